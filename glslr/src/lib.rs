//! glslr is a programmable source-to-source transformation engine for the OpenGL
//! Shading Language. It parses GLSL into a typed, parent-linked syntax tree held in an
//! arena, lets client code interrogate and mutate that tree through indices, structural
//! matchers and code-fragment templates, and reprints the result as GLSL text.
//!
//! The typical entry point is [transform::TransformationManager], which schedules
//! transformation phases against a single parse.

pub use glsl;

#[macro_use]
extern crate log;

#[macro_use]
extern crate lazy_static;

mod error;
pub use error::*;

pub mod ast;

pub mod parse;

pub mod pattern;

pub mod transform;
