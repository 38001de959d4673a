//! Joke sources backed by external services

mod dad_joke;

pub use dad_joke::DadJokeClient;
