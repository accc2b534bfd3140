pub mod support;

mod parse;
