/// Wrapped SOL mint, used as the key for the native SOL balance.
pub const NATIVE_MINT: &str = "So11111111111111111111111111111111111111112";

/// Display name reported for the native asset whatever the metadata source says.
pub const NATIVE_DISPLAY_NAME: &str = "Solana";

pub fn is_native_mint(mint: &str) -> bool {
    mint == NATIVE_MINT
}
