use application::auth::{TokenService, UserClaims};
use application::error::AppError;
use bcrypt::hash as bcrypt_hash;
use bcrypt::verify as bcrypt_verify;
use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use serde::{Deserialize, Serialize};

pub trait AuthConfig {
    fn jwt_secret(&self) -> String;
    fn jwt_expire_secs(&self) -> i64;
    fn salt_cost(&self) -> i32;
}

#[derive(Debug, Clone)]
pub struct BcryptPasswordHasher {
    salt_cost: i32,
}

impl BcryptPasswordHasher {
    pub fn new(salt_cost: i32) -> Self {
        Self { salt_cost }
    }
}

impl application::auth::PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, plain: &str) -> Result<String, AppError> {
        bcrypt_hash(plain, self.salt_cost as u32).map_err(|e| AppError::AuthError(e.to_string()))
    }

    fn verify(&self, pwd: &str, hashed_pwd: &str) -> Result<(), AppError> {
        if bcrypt_verify(pwd, hashed_pwd).unwrap_or(false) {
            Ok(())
        } else {
            Err(AppError::AuthError("invalid password".to_string()))
        }
    }
}

#[derive(Debug, Clone)]
pub struct JwtTokenService {
    jwt_secret: String,
    exp_secs: i64,
}

impl JwtTokenService {
    pub fn new(jwt_secret: &str, exp_secs: i64) -> Self {
        Self {
            jwt_secret: jwt_secret.to_string(),
            exp_secs,
        }
    }

    pub fn from_config(cfg: &impl AuthConfig) -> Self {
        Self::new(&cfg.jwt_secret(), cfg.jwt_expire_secs())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct JwtClaims {
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

impl JwtClaims {
    fn new(claims: &UserClaims, exp_secs: i64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub: claims.user_name.clone(),
            exp: now + exp_secs,
            iat: now,
        }
    }
}

impl From<JwtClaims> for UserClaims {
    fn from(claims: JwtClaims) -> Self {
        Self {
            user_name: claims.sub,
        }
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, claims: &UserClaims) -> Result<String, AppError> {
        let claims: JwtClaims = JwtClaims::new(claims, self.exp_secs);
        let key = EncodingKey::from_secret(self.jwt_secret.as_bytes());
        let header = Header::new(Algorithm::HS256);
        let token =
            encode(&header, &claims, &key).map_err(|e| AppError::AuthError(e.to_string()))?;
        Ok(token)
    }

    fn verify(&self, token: &str) -> Result<UserClaims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        let token_data = decode::<JwtClaims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AppError::TokenExpired,
            _ => AppError::AuthError(e.to_string()),
        })?;

        Ok(token_data.claims.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use application::auth::PasswordHasher;

    fn claims() -> UserClaims {
        UserClaims {
            user_name: "taozhe".to_string(),
        }
    }

    #[test]
    fn test_bcrypt_hash_and_verify() {
        let hasher = BcryptPasswordHasher::new(4);
        let hashed = hasher.hash("secret1").unwrap();
        assert_ne!(hashed, "secret1");
        assert!(hasher.verify("secret1", &hashed).is_ok());
        assert!(hasher.verify("secret2", &hashed).is_err());
    }

    #[test]
    fn test_issue_and_verify_token() {
        let svc = JwtTokenService::new("test-secret", 3600);
        let token = svc.issue(&claims()).unwrap();
        assert_eq!(svc.verify(&token).unwrap(), claims());
    }

    #[test]
    fn test_token_signed_with_other_secret_is_invalid() {
        let token = JwtTokenService::new("secret-a", 3600)
            .issue(&claims())
            .unwrap();
        let result = JwtTokenService::new("secret-b", 3600).verify(&token);
        assert!(matches!(result, Err(AppError::AuthError(_))));
        assert!(matches!(
            JwtTokenService::new("secret-b", 3600).verify("not-a-jwt"),
            Err(AppError::AuthError(_))
        ));
    }

    #[test]
    fn test_expired_token() {
        let svc = JwtTokenService::new("test-secret", -120);
        let token = svc.issue(&claims()).unwrap();
        assert!(matches!(svc.verify(&token), Err(AppError::TokenExpired)));
    }
}
