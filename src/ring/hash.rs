use std::sync::Arc;

use crate::error::McError;

/// A 32-bit hash used for ring points and keys
pub trait KeyHasher: Send + Sync {
    fn hash(&self, data: &[u8]) -> u32;
}

impl<F> KeyHasher for F
where
    F: Fn(&[u8]) -> u32 + Send + Sync,
{
    fn hash(&self, data: &[u8]) -> u32 {
        self(data)
    }
}

/// Bob Jenkins' one-at-a-time hash (libmemcached `HASH_ONE_AT_A_TIME`)
#[derive(Debug, Clone, Copy, Default)]
pub struct Jenkins32;

impl KeyHasher for Jenkins32 {
    fn hash(&self, data: &[u8]) -> u32 {
        one_at_a_time(data)
    }
}

/// 32-bit FNV-1a (libmemcached `HASH_FNV1A_32`)
#[derive(Debug, Clone, Copy, Default)]
pub struct Fnv1a32;

impl KeyHasher for Fnv1a32 {
    fn hash(&self, data: &[u8]) -> u32 {
        fnv1a_32(data)
    }
}

#[inline]
pub fn one_at_a_time(data: &[u8]) -> u32 {
    let mut h: u32 = 0;
    for &b in data {
        h = h.wrapping_add(b as u32);
        h = h.wrapping_add(h << 10);
        h ^= h >> 6;
    }
    h = h.wrapping_add(h << 3);
    h ^= h >> 11;
    h = h.wrapping_add(h << 15);
    h
}

#[inline]
pub fn fnv1a_32(data: &[u8]) -> u32 {
    const FNV_PRIME: u32 = 16777619;
    const FNV_OFFSET_BASIS: u32 = 2166136261;

    let mut h = FNV_OFFSET_BASIS;
    for &b in data {
        h ^= b as u32;
        h = h.wrapping_mul(FNV_PRIME);
    }
    h
}

/// Built-in hash selection for configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashKind {
    #[default]
    Jenkins,
    Fnv1a,
}

impl HashKind {
    pub fn hasher(self) -> Arc<dyn KeyHasher> {
        match self {
            HashKind::Jenkins => Arc::new(Jenkins32),
            HashKind::Fnv1a => Arc::new(Fnv1a32),
        }
    }
}

impl std::str::FromStr for HashKind {
    type Err = McError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jenkins" | "one-at-a-time" | "one_at_a_time" => Ok(HashKind::Jenkins),
            "fnv1a" | "fnv1a_32" | "fnv1a-32" => Ok(HashKind::Fnv1a),
            other => Err(McError::Config(format!("unknown hash function {:?}", other))),
        }
    }
}
