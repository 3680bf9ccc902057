use super::*;

/// Checks an email/password pair against the stored hash.
///
/// Unknown email, missing hash and wrong password all produce the same
/// [`ApiError::InvalidCredentials`]; the first two still pay for one hash
/// verification so response timing does not reveal which case occurred.
pub async fn verify<A: Accounts>(accounts: &A, email: &str, password: &str) -> Result<Account, ApiError> {
    match accounts.by_email(email).await? {
        Some((account, Some(hashword))) => match password::verify(password, &hashword) {
            true => Ok(account),
            false => Err(ApiError::InvalidCredentials),
        },
        Some((_, None)) | None => {
            password::decoy(password);
            Err(ApiError::InvalidCredentials)
        }
    }
}
