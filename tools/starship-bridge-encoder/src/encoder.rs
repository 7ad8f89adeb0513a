use alloy_primitives::{Address, Bytes, FixedBytes, U256};

use crate::errors::EncodeError;

const ADDRESS_LEN: usize = 20;
const WORD: usize = 32;

/// Left-pad a raw 20-byte address into a `bytes32` field (12 zero bytes, then the address).
pub fn pad_address_to_32_bytes(address: &[u8]) -> Result<FixedBytes<32>, EncodeError> {
    if address.len() != ADDRESS_LEN {
        return Err(EncodeError::InvalidAddressLength(address.len()));
    }
    let mut padded = [0u8; WORD];
    padded[WORD - ADDRESS_LEN..].copy_from_slice(address);
    Ok(FixedBytes(padded))
}

/// Infallible form of [`pad_address_to_32_bytes`] for an already-typed address.
pub fn address_to_bytes32(address: Address) -> FixedBytes<32> {
    let mut padded = [0u8; WORD];
    padded[WORD - ADDRESS_LEN..].copy_from_slice(address.as_slice());
    FixedBytes(padded)
}

/// `abi.encode(uint8 playerId, uint256 tokenId)`, the payload `lzCompose` expects.
///
/// Layout: two big-endian 32-byte words, the player id right-aligned in the first.
pub fn encode_compose_message(player_id: u8, token_id: U256) -> Bytes {
    let mut buf = Vec::with_capacity(WORD * 2);

    let mut player_word = [0u8; WORD];
    player_word[WORD - 1] = player_id;
    buf.extend_from_slice(&player_word);

    buf.extend_from_slice(&token_id.to_be_bytes::<32>());
    Bytes::from(buf)
}

/// Inverse of [`encode_compose_message`]; strict about length and padding.
pub fn decode_compose_message(bytes: &[u8]) -> Result<(u8, U256), EncodeError> {
    if bytes.len() != WORD * 2 {
        return Err(EncodeError::MalformedComposeMessage);
    }
    if bytes[..WORD - 1].iter().any(|b| *b != 0) {
        return Err(EncodeError::MalformedComposeMessage);
    }
    let player_id = bytes[WORD - 1];
    let token_id = U256::from_be_slice(&bytes[WORD..]);
    Ok((player_id, token_id))
}

/// Decode `0x`-prefixed (or bare) hex into bytes. Empty input and `0x` are both empty bytes.
pub fn parse_hex_bytes(input: &str) -> Result<Bytes, EncodeError> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let raw = hex::decode(digits).map_err(|e| EncodeError::InvalidHex(e.to_string()))?;
    Ok(Bytes::from(raw))
}

/// Parse a hex address, rejecting anything that is not exactly 20 bytes.
pub fn parse_address(input: &str) -> Result<Address, EncodeError> {
    let raw = parse_hex_bytes(input)?;
    if raw.len() != ADDRESS_LEN {
        return Err(EncodeError::InvalidAddressLength(raw.len()));
    }
    Ok(Address::from_slice(&raw))
}
