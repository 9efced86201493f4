use rand::Rng;

use crate::SessionId;

const SESSION_ID_BYTES: usize = 16;

pub fn generate_session_id() -> SessionId {
    let mut rng = rand::rng();
    let hex: String = (0..SESSION_ID_BYTES)
        .map(|_| format!("{:02x}", rng.random::<u8>()))
        .collect();
    SessionId::new(hex)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_is_lowercase_hex() {
        let id = generate_session_id();
        assert_eq!(id.as_str().len(), SESSION_ID_BYTES * 2);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_session_ids_differ() {
        assert_ne!(generate_session_id(), generate_session_id());
    }
}
