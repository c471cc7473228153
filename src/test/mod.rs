//! Shared bean fixtures for unit tests.

use std::sync::Arc;

use crate::{
    metadata::{BeanInfoBuilder, Introspect},
    Result,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Breed {
    #[default]
    Mixed,
    Labrador,
    Poodle,
}

crate::property_constants!(Breed { Mixed, Labrador, Poodle });

#[derive(Debug, Default)]
pub struct Owner {
    pub name: String,
}

/// Covers every kind of property: scalar, enumerated, optional, object and read-only.
#[derive(Debug, Clone, Default)]
pub struct Dog {
    pub name: String,
    pub age: u32,
    pub good: bool,
    pub breed: Breed,
    pub weight: f64,
    pub id: u64,
    pub nickname: Option<String>,
    pub owner: Option<Arc<Owner>>,
    pub barks: u32,
    pub fetched: Vec<String>,
}

impl Dog {
    pub fn named(name: &str, age: u32) -> Self {
        Dog {
            name: name.to_string(),
            age,
            good: true,
            id: 7,
            ..Dog::default()
        }
    }
}

impl Introspect for Dog {
    fn introspect(info: &mut BeanInfoBuilder<Self>) -> Result<()> {
        info.property("name", |d: &Dog| d.name.clone(), |d, v| d.name = v)
            .property("age", |d: &Dog| d.age, |d, v| d.age = v)
            .property("good", |d: &Dog| d.good, |d, v| d.good = v)
            .property("breed", |d: &Dog| d.breed, |d, v| d.breed = v)
            .property("weight", |d: &Dog| d.weight, |d, v| d.weight = v)
            .read_only("id", |d: &Dog| d.id)
            .property("nickname", |d: &Dog| d.nickname.clone(), |d, v| d.nickname = v)
            .property("owner", |d: &Dog| d.owner.clone(), |d, v| d.owner = v)
            .method0("bark", |d: &mut Dog| {
                d.barks += 1;
                format!("{} says woof", d.name)
            })
            .method1("fetch", |d: &mut Dog, item: String| d.fetched.push(item))
            .default_constructor();
        Ok(())
    }
}

/// Declared assignable to [`Dog`]; shares some of its properties.
#[derive(Debug, Clone, Default)]
pub struct Labrador {
    pub name: String,
    pub age: u32,
    pub good: bool,
    pub retrieves: bool,
}

impl Introspect for Labrador {
    fn introspect(info: &mut BeanInfoBuilder<Self>) -> Result<()> {
        info.property("name", |d: &Labrador| d.name.clone(), |d, v| d.name = v)
            .property("age", |d: &Labrador| d.age, |d, v| d.age = v)
            .property("good", |d: &Labrador| d.good, |d, v| d.good = v)
            .property("retrieves", |d: &Labrador| d.retrieves, |d, v| d.retrieves = v)
            .assignable_to::<Dog>()
            .default_constructor();
        Ok(())
    }
}

/// Assignable to [`Dog`], but its `age` cannot be read.
#[derive(Debug, Clone, Default)]
pub struct Puppy {
    pub name: String,
    pub age: u32,
}

impl Introspect for Puppy {
    fn introspect(info: &mut BeanInfoBuilder<Self>) -> Result<()> {
        info.property("name", |p: &Puppy| p.name.clone(), |p, v| p.name = v)
            .write_only("age", |p: &mut Puppy, v: u32| p.age = v)
            .assignable_to::<Dog>();
        Ok(())
    }
}

/// Unrelated to [`Dog`] despite sharing a property name.
#[derive(Debug, Clone, Default)]
pub struct Car {
    pub name: String,
    pub wheels: u8,
}

impl Introspect for Car {
    fn introspect(info: &mut BeanInfoBuilder<Self>) -> Result<()> {
        info.property("name", |c: &Car| c.name.clone(), |c, v| c.name = v)
            .property("wheels", |c: &Car| c.wheels, |c, v| c.wheels = v)
            .default_constructor();
        Ok(())
    }
}
