//! Presentation: figure model, chart builders and page composition.

pub mod figure;
pub mod panels;
pub mod plot;
