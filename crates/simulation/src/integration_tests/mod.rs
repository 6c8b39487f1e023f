mod streaming_tests;
mod world_setup_tests;
