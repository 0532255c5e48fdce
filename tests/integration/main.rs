//! Integration tests for cueplay

mod helpers;

mod cli_test;
mod config_test;
mod coordinator_test;
mod playlist_test;
