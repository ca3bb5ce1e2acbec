/// Program ids, account sizes and layout offsets shared across the crate.
use solana_sdk::pubkey;
use solana_sdk::pubkey::Pubkey;

// =============================================================================
// PROGRAM IDS
// =============================================================================

/// Raydium AMM v4 program
pub const RAYDIUM_AMM_V4_PROGRAM_ID: Pubkey =
    pubkey!("675kPX9MHTjS2zt1qfr1NYHuzeLXfQM9H24wFSUt1Mp8");

/// Raydium AMM v4 global authority (signs vault transfers)
pub const RAYDIUM_AMM_AUTHORITY: Pubkey = pubkey!("5Q544fKrFoe6tsEbD7S8EmxGTJYAKtTVhAW5Q5pge4j1");

/// Serum / OpenBook v3 market program used by most AMM v4 pools
pub const SERUM_MARKET_PROGRAM_ID: Pubkey = pubkey!("srmqPvymJeFKQ4zGQed1GFppgkRHL9kaELCbyksJtPX");

// =============================================================================
// MINTS
// =============================================================================

/// Wrapped SOL mint
pub const WSOL_MINT: Pubkey = pubkey!("So11111111111111111111111111111111111111112");

/// Native SOL placeholder; resolves to the owner's own address
pub const NATIVE_SOL_MINT: Pubkey = pubkey!("11111111111111111111111111111111");

// =============================================================================
// ACCOUNT LAYOUT
// =============================================================================

/// SPL token account size in bytes
pub const TOKEN_ACCOUNT_SIZE: usize = 165;

/// Offset of the `amount` field inside an SPL token account
pub const TOKEN_ACCOUNT_AMOUNT_OFFSET: usize = 64;

/// Raydium AMM v4 state size
pub const AMM_V4_ACCOUNT_SIZE: usize = 752;

/// Offset of `base_mint` inside AMM v4 state (memcmp filter)
pub const AMM_V4_BASE_MINT_OFFSET: usize = 400;

/// Offset of `quote_mint` inside AMM v4 state (memcmp filter)
pub const AMM_V4_QUOTE_MINT_OFFSET: usize = 432;

/// Serum market v3 state size including head and tail padding
pub const MARKET_V3_ACCOUNT_SIZE: usize = 388;

// =============================================================================
// INSTRUCTIONS
// =============================================================================

/// AMM v4 `swap_base_in` opcode
pub const RAYDIUM_SWAP_OPCODE: u8 = 9;

/// Number of accounts referenced by the AMM v4 swap instruction
pub const RAYDIUM_SWAP_ACCOUNT_COUNT: usize = 18;

/// Maximum accounts per getMultipleAccounts request
pub const MULTIPLE_ACCOUNTS_CHUNK: usize = 100;

/// Returns true for the wrapped SOL mint
pub fn is_wsol_mint(mint: &Pubkey) -> bool {
    *mint == WSOL_MINT
}

/// Maps WSOL onto the native placeholder so balance lookups hit the owner's lamports
pub fn native_mapped_mint(mint: &Pubkey) -> Pubkey {
    if is_wsol_mint(mint) {
        NATIVE_SOL_MINT
    } else {
        *mint
    }
}
