#![allow(dead_code)]

use method_stub::{MethodTable, StubRegistry, Stubbable};
use std::sync::atomic::{AtomicU64, Ordering};

/// Behaviour shared by the real subject and its stub wrapper, standing in
/// for code under test that only knows the trait.
pub trait Greet {
    fn greet(&self, name: String) -> String;
    fn greet_all(&self, names: Vec<String>, separator: String) -> String;
}

pub struct Greeter {
    pub greeting: String,
}

impl Greeter {
    pub fn new() -> Self {
        Self {
            greeting: "Hello".to_string(),
        }
    }
}

impl Greet for Greeter {
    fn greet(&self, name: String) -> String {
        format!("{}, {}", self.greeting, name)
    }

    fn greet_all(&self, names: Vec<String>, separator: String) -> String {
        names
            .into_iter()
            .map(|name| self.greet(name))
            .collect::<Vec<_>>()
            .join(&separator)
    }
}

impl Stubbable for Greeter {
    fn method_table() -> MethodTable<Self> {
        MethodTable::new()
            .method("greet", <Greeter as Greet>::greet)
            .method("greet_all", <Greeter as Greet>::greet_all)
    }
}

/// Hand-written wrapper: every method forwards through the registry.
pub struct StubbedGreeter {
    pub stubs: StubRegistry<Greeter>,
}

impl StubbedGreeter {
    pub fn new() -> Self {
        Self {
            stubs: StubRegistry::new(Greeter::new()),
        }
    }
}

impl Greet for StubbedGreeter {
    fn greet(&self, name: String) -> String {
        self.stubs
            .call("greet", (name,))
            .expect("greet dispatch failed")
    }

    fn greet_all(&self, names: Vec<String>, separator: String) -> String {
        self.stubs
            .call("greet_all", (names, separator))
            .expect("greet_all dispatch failed")
    }
}

/// Code under test that only sees `Greet`.
pub fn welcome_party(greeter: &impl Greet, guests: &[&str]) -> Vec<String> {
    guests
        .iter()
        .map(|guest| greeter.greet(guest.to_string()))
        .collect()
}

#[derive(Default)]
pub struct Counter {
    pub total: AtomicU64,
}

impl Counter {
    pub fn inc(&self, by: u64) -> u64 {
        self.total.fetch_add(by, Ordering::SeqCst) + by
    }

    pub fn get(&self) -> u64 {
        self.total.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.total.store(0, Ordering::SeqCst);
    }
}

impl Stubbable for Counter {
    fn method_table() -> MethodTable<Self> {
        MethodTable::new()
            .method("inc", Counter::inc)
            .method("get", Counter::get)
            .method("reset", Counter::reset)
    }
}
