#![warn(rust_2018_idioms)]

#[macro_use]
extern crate serde_derive;

pub mod conf;
pub mod error;
pub mod keychain;
pub mod lookup;
pub mod roster;
pub mod settings;
pub mod store;
pub mod url;
