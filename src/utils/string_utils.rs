/// Utilitários de string para logs e payloads de erro

/// Trunca uma string sem cortar um caractere UTF-8 no meio
///
/// Retorna o maior prefixo com no máximo `max_bytes` bytes que termina
/// em um limite de caractere válido.
pub fn truncate_safe(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }

    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }

    &s[..end]
}

/// Trunca e adiciona `suffix` somente quando algo foi cortado
pub fn truncate_with_suffix(s: &str, max_bytes: usize, suffix: &str) -> String {
    let truncated = truncate_safe(s, max_bytes);
    if truncated.len() < s.len() {
        format!("{}{}", truncated, suffix)
    } else {
        truncated.to_string()
    }
}

/// Forma segura de exibir um token em logs: só os primeiros 8 bytes
pub fn mask_token(token: &str) -> String {
    if token.is_empty() {
        return "<empty>".to_string();
    }
    format!("{}...", truncate_safe(token, 8))
}
