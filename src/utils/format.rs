use anyhow::{Result, bail};

/// Length of `0x` followed by 20 bytes of hex.
pub const ETH_ADDRESS_LEN: usize = 42;

/// 检查 Ethereum 地址格式: `0x` + 40 hex chars, case-insensitive, no checksum.
pub fn validate_eth_address(address: &str) -> Result<()> {
    // 检查长度
    if address.len() != ETH_ADDRESS_LEN {
        bail!(
            "Invalid address length: expected {}, got {}",
            ETH_ADDRESS_LEN,
            address.len()
        );
    }

    // 检查前缀, "0X" is rejected
    if !address.starts_with("0x") {
        bail!("Invalid address prefix: expected '0x'");
    }

    // 检查是否全部为 hex 字符
    if !address.bytes().skip(2).all(|b| b.is_ascii_hexdigit()) {
        bail!("Address contains non-hex characters");
    }

    Ok(())
}

pub fn is_eth_address(address: &str) -> bool {
    validate_eth_address(address).is_ok()
}
