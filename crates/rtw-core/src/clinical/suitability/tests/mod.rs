mod catalog;
mod common;
mod modifications;
