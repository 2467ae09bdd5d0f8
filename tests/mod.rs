mod message_tests;
mod registry_tests;
