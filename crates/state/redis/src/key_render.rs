use smsgate_state::StateKey;

/// Render a [`StateKey`] into a Redis key string.
///
/// Without a prefix this is the key's canonical form (`hm_token_<uuid>`);
/// with one it becomes `prefix:hm_token_<uuid>`.
pub fn render_key(prefix: Option<&str>, key: &StateKey) -> String {
    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}:{}", key.canonical()),
        _ => key.canonical(),
    }
}
