#![cfg(test)]

mod testing;

#[cfg(unix)]
mod network;
mod warnings;
