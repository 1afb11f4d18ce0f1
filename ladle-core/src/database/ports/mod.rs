//! Repository ports (interfaces). Domain services depend on these traits;
//! implementations live under `database::infrastructure`.

pub mod recipes;
