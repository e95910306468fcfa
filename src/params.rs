//! RollHash consensus parameters
//!
//! Every constant in this file is part of the wire contract: a node that
//! disagrees on any of them derives different hash constants and forks.

/// LCG multiplier (Knuth's MMIX constant)
pub const BASE_MULTIPLICAND: u64 = 6364136223846793005;

/// LCG increment (Knuth's MMIX constant)
pub const BASE_ADDEND: u64 = 1442695040888963407;

/// Cipher block size in bytes (640 bits)
pub const BLOCK_SIZE: usize = 80;

/// Number of cipher rounds
pub const ROUNDS: usize = 84;

/// Width of the cipher's internal words, in bits
pub const WORD_BITS: u32 = 64;

/// Number of 64-bit words in the cipher state
pub const STATE_WORDS: usize = BLOCK_SIZE * 8 / WORD_BITS as usize;

/// Adjacent word pairs operated on by each pbox stage
pub const WORD_PAIRS: usize = STATE_WORDS / 2;

/// Small sbox input width in bits (sized for FPGA logic elements)
pub const SMALL_SBOX_WIDTH: usize = 6;

/// Large sbox input width in bits (sized for FPGA RAM elements)
pub const LARGE_SBOX_WIDTH: usize = 10;

/// Entries in one small sbox
pub const SMALL_SBOX_SIZE: usize = 1 << SMALL_SBOX_WIDTH;

/// Entries in one large sbox
pub const LARGE_SBOX_SIZE: usize = 1 << LARGE_SBOX_WIDTH;

/// Number of small sboxes: one per (6-bit, 10-bit) chunk pair in the block
pub const SMALL_SBOX_COUNT: usize =
    BLOCK_SIZE * 8 / (SMALL_SBOX_WIDTH + LARGE_SBOX_WIDTH);

/// Number of large sboxes: one per state word
pub const LARGE_SBOX_COUNT: usize = STATE_WORDS;

/// Stages in each permutation network
pub const PBOX_SUBROUNDS: usize = 6;

/// Word-shuffle multiplier; a generator of the multiplicative group mod
/// `STATE_WORDS` (3 or 7 for 10 words)
pub const PBOX_M: usize = 3;

/// Multiplicative inverse of `PBOX_M` modulo `STATE_WORDS`
pub const INV_PBOX_M: usize = 7;

/// Rotation amounts in the linear mixing layer; must be even
pub const ROTATION_COUNT: usize = 6;

/// Entries in the prime and fraction tables (2^14)
pub const TABLE_SIZE: usize = 16384;

/// Bits per extracted table index
pub const TABLE_SIZE_BITS: usize = 14;

/// Unix-time anchor of epoch zero
pub const ANCHOR_TIME: u64 = 1609653714;

/// Epoch length in seconds (ten days)
pub const EPOCH_PERIOD: u64 = 864000;
