pub mod jwt;

pub use jwt::{AccessTokenClaims, JwtManager};
