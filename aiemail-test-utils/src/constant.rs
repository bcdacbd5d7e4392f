pub static TEST_USER_ID: &str = "user-123";
pub static TEST_EMAIL: &str = "jane@example.com";
pub static TEST_GOOGLE_EMAIL: &str = "jane.doe@gmail.com";
pub static TEST_REFRESH_TOKEN: &str = "refresh-token-value";
pub static TEST_PASSWORD: &str = "correct horse battery staple";
