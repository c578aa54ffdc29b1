//! Phone -> account resolution.
//!
//! The first successful SMS login for an unbound phone creates the account
//! lazily: account row, user-info row, and phone binding all commit in one
//! transaction or not at all.

use sqlx::PgPool;
use tracing::{debug, info};

use crate::common::{violated_constraint, AuthError, AuthResult};

use super::models::{generate_account_id, Account, PhoneAccount, UserInfo};

const MAX_ID_ATTEMPTS: u32 = 10;

/// Resolve a phone digest to its account id, creating the account when no
/// binding exists.
///
/// An id collision on the accounts primary key rolls the transaction back
/// and retries with a fresh id, up to [`MAX_ID_ATTEMPTS`]. A collision on
/// the binding itself means a concurrent signup raced ahead; that error
/// surfaces as-is and the whole transaction rolls back.
pub async fn resolve_or_create_by_phone(phone_digest: &str, pool: &PgPool) -> AuthResult<String> {
    if let Some(binding) = PhoneAccount::find_by_phone(phone_digest, pool).await? {
        debug!(account_id = %binding.account_id, "phone already bound");
        return Ok(binding.account_id);
    }

    for _ in 0..MAX_ID_ATTEMPTS {
        let account_id = generate_account_id();
        let mut tx = pool.begin().await?;

        match Account::insert_new(&account_id, Some(phone_digest), &mut tx).await {
            Ok(()) => {}
            Err(AuthError::Database(err))
                if violated_constraint(&err) == Some("accounts_pkey") =>
            {
                tx.rollback().await?;
                debug!("account id collision, regenerating");
                continue;
            }
            Err(err) => return Err(err),
        }

        UserInfo::insert(&account_id, &default_nickname(&account_id), &mut tx).await?;
        PhoneAccount::insert(phone_digest, &account_id, &mut tx).await?;
        tx.commit().await?;

        info!(%account_id, "created account on first login");
        return Ok(account_id);
    }

    Err(AuthError::ServerBusy)
}

fn default_nickname(account_id: &str) -> String {
    let tail = &account_id[account_id.len().saturating_sub(4)..];
    format!("user_{}", tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nickname_uses_id_tail() {
        assert_eq!(default_nickname("123456789012"), "user_9012");
    }

    #[test]
    fn nickname_handles_short_ids() {
        assert_eq!(default_nickname("42"), "user_42");
    }
}
