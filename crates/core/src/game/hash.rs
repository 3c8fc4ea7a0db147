//! Stable snapshot hashing for deterministic verification.
//! Frightened modes are left out: they follow wall-clock time, not ticks.

use std::hash::Hasher;

use super::*;
use xxhash_rust::xxh3::Xxh3;

impl Game {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.tick);
        for entity in self.state.entities.values() {
            let pos = entity.pos();
            hasher.write_i32(pos.row);
            hasher.write_i32(pos.col);
        }
        let player = self.state.player();
        hasher.write_u32(player.score);
        hasher.write_u32(player.lives);
        hasher.write_u64(self.state.dots_remaining as u64);
        hasher.write_u8(match self.state.outcome {
            None => 0,
            Some(Outcome::Win) => 1,
            Some(Outcome::Loss) => 2,
        });
        hasher.finish()
    }
}

/// `0x` followed by exactly 16 lowercase hex digits.
pub fn format_snapshot_hash(hash: u64) -> String {
    format!("0x{hash:016x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatted_hash_is_16_hex_digits() {
        assert_eq!(format_snapshot_hash(0), "0x0000000000000000");
        assert_eq!(format_snapshot_hash(0xDEADBEEF), "0x00000000deadbeef");
        assert_eq!(format_snapshot_hash(u64::MAX), "0xffffffffffffffff");
    }
}
