mod create_service_tests;
mod smtp_tests;
