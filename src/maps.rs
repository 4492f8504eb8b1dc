use std::collections::HashMap;
use std::hash::Hash;

/// Swap keys and values. When several keys share a value, which key wins is
/// unspecified.
pub fn reverse<K, V>(map: HashMap<K, V>) -> HashMap<V, K>
where
    V: Eq + Hash,
{
    map.into_iter().map(|(k, v)| (v, k)).collect()
}
