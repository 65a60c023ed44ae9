//! Generación de tokens QR
//!
//! Los contratos llevan un identificador corto escaneable con el formato
//! `{PREFIJO}-{id aleatorio de 12 caracteres}` (ej. "CNT-V1StGXR8_Z5j").
//! La unicidad es probabilística: no hay dígito de control ni reintento,
//! la validez la determina únicamente la existencia de la fila.

use rand::Rng;

/// Alfabeto url-safe (estilo nanoid)
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Longitud del cuerpo aleatorio del token
pub const TOKEN_BODY_LEN: usize = 12;

/// Prefijo de contexto para contratos
pub const CONTRACT_PREFIX: &str = "CNT";

/// Generar un token QR con el prefijo de contexto dado
pub fn generate_qr_token(prefix: &str) -> String {
    let mut rng = rand::thread_rng();
    let body: String = (0..TOKEN_BODY_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..ALPHABET.len());
            ALPHABET[idx] as char
        })
        .collect();

    format!("{}-{}", prefix, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_format() {
        let token = generate_qr_token(CONTRACT_PREFIX);
        let (prefix, body) = token.split_once('-').expect("token sin separador");

        assert_eq!(prefix, "CNT");
        assert_eq!(body.len(), TOKEN_BODY_LEN);
        assert!(body
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-'));
    }

    #[test]
    fn test_tokens_vary() {
        let a = generate_qr_token(CONTRACT_PREFIX);
        let b = generate_qr_token(CONTRACT_PREFIX);
        // 64^12 combinaciones: dos tokens iguales indican un RNG roto
        assert_ne!(a, b);
    }
}
