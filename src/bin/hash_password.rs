//! Print an Argon2 hash for `ADMIN_PASSWORD_HASH`.
//!
//! Usage: `hash-password <password>`

use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};

fn main() -> anyhow::Result<()> {
    let password = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("usage: hash-password <password>"))?;
    if password.is_empty() {
        anyhow::bail!("password must not be empty");
    }

    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();

    println!("{hash}");
    Ok(())
}
