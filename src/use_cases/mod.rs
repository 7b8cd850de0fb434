// Use cases layer: navigation-time session decisions.

pub mod guard;
