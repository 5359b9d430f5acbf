use soroban_sdk::Env;
use crate::storage;
use crate::types::FidcError;

// ============================================================================
// REENTRANCY GUARD
// ============================================================================

/// Executa `f` com o guard de reentrância travado.
/// O guard é liberado mesmo quando `f` retorna `Err`.
pub fn with_reentrancy_guard<T, F>(env: &Env, f: F) -> Result<T, FidcError>
where
    F: FnOnce() -> Result<T, FidcError>,
{
    if storage::is_reentrancy_locked(env) {
        return Err(FidcError::ReentrancyGuardReentrantCall);
    }
    storage::set_reentrancy_guard(env, true);

    let result = f();

    // === LIBERAR GUARD ===
    storage::set_reentrancy_guard(env, false);
    result
}
