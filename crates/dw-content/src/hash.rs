//! Content hashing.

use std::io::{self, Read};

use sha2::{Digest, Sha256};

/// Read `reader` to the end and return the lowercase hex SHA-256 of its bytes.
///
/// # Example
///
/// ```
/// use dw_content::sha256_hex;
///
/// let hash = sha256_hex(&mut "hello".as_bytes()).unwrap();
/// assert_eq!(
///     hash,
///     "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
/// );
/// ```
pub fn sha256_hex(reader: &mut dyn Read) -> io::Result<String> {
    let mut hasher = Sha256::new();
    let mut buf = [0_u8; 8192];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}
