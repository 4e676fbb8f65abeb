//! 字符串工具模块
//! 地址缩写与网络标签格式化

/// 缩写钱包地址为 "0x1234...abcd" 形式
///
/// 过短的地址原样返回
pub fn shorten_address(address: &str) -> String {
    if address.len() <= 10 {
        return address.to_string();
    }
    format!("{}...{}", &address[..6], &address[address.len() - 4..])
}

/// 将链标识符转换为展示标签
///
/// 连字符替换为空格，首字母大写："arbitrum-nova" -> "Arbitrum nova"
pub fn prettify_network(identifier: &str) -> String {
    let replaced = identifier.replace('-', " ");
    let mut chars = replaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => replaced,
    }
}
