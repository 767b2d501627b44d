//! Session tokens and password handling

mod jwt;
mod password;

pub use jwt::{Claims, JwtService};
pub use password::{
    generate_password, hash_password, validate_password_length, verify_password, PasswordService,
    MIN_PASSWORD_LENGTH,
};
