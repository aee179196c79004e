use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};

// ─── Password hashing ────────────────────────────────────────────

const HASH_ROUNDS: u32 = 1_000;
const SALT_BYTES: usize = 16;

/// Bytes of entropy in verification / reset tokens (hex doubles it).
pub const TOKEN_BYTES: usize = 32;

/// Salted, stretched SHA-512, stored as `salt:hash` (both hex).
/// Demo-grade on purpose; swap for argon2 before real deployments.
pub fn hash_password(password: &str) -> String {
    let salt = generate_token(SALT_BYTES);
    let digest = stretch(password, &salt);
    format!("{salt}:{digest}")
}

/// Check a password against a stored `salt:hash` string.
/// Malformed stored values simply fail the check.
pub fn verify_password(password: &str, stored: &str) -> bool {
    match stored.split_once(':') {
        Some((salt, hash)) => stretch(password, salt) == hash,
        None => false,
    }
}

fn stretch(password: &str, salt: &str) -> String {
    let mut digest = Sha512::new()
        .chain_update(salt.as_bytes())
        .chain_update(password.as_bytes())
        .finalize();
    for _ in 1..HASH_ROUNDS {
        digest = Sha512::new()
            .chain_update(digest.as_slice())
            .chain_update(password.as_bytes())
            .finalize();
    }
    hex::encode(digest)
}

/// Random hex token for email verification, password reset, etc.
pub fn generate_token(bytes: usize) -> String {
    let mut buf = vec![0u8; bytes];
    rand::thread_rng().fill_bytes(&mut buf);
    hex::encode(buf)
}

// ─── JWT ─────────────────────────────────────────────────────────

const JWT_TTL_SECS: i64 = 86_400; // 24 hours

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: u64,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issue an HS256 session token for a logged-in user.
pub fn issue_jwt(user_id: u64, email: &str, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        email: email.to_owned(),
        iat: now,
        exp: now + JWT_TTL_SECS,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
}

/// Validate signature and expiry, returning the claims.
pub fn verify_jwt(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

// ─── Tests ───────────────────────────────────────────────────────
