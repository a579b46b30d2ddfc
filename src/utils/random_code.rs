use rand::Rng;

const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// 生成指定长度的随机字母数字串（初始管理员密码等场景）
pub fn generate_code(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_code_length() {
        assert_eq!(generate_code(16).len(), 16);
        assert_eq!(generate_code(0).len(), 0);
    }

    #[test]
    fn test_generate_code_charset() {
        let code = generate_code(64);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
