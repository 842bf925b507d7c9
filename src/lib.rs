pub mod animation;
pub mod audio;
pub mod character;
pub mod clock;
pub mod collision;
pub mod combat;
pub mod config;
pub mod enemy;
pub mod entities;
pub mod error;
pub mod input;
pub mod level;
pub mod objects;
pub mod physics;
pub mod scheduler;
pub mod status_bar;
pub mod surface;
pub mod world;
