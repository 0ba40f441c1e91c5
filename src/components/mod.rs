pub mod store;

pub mod model;

pub mod service;

pub mod repl;
