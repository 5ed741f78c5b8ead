use std::fmt;

pub fn next_value<T>(it: &mut std::slice::Iter<'_, std::string::String>, opt: &str) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    let n = it
        .next()
        .ok_or_else(|| anyhow::anyhow!("{}: value missing", opt))?;
    n.parse()
        .map_err(|e| anyhow::anyhow!("{}: {} '{}'", opt, e, n))
}

pub fn unixtime_now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

pub fn prompt() -> String {
    use std::io::{stdin, stdout, Write};
    print!("> ");
    stdout().flush().ok();
    let mut buf = String::new();
    stdin().read_line(&mut buf).ok();
    buf
}

pub fn write_to_file(file_path: &str, data: &str) -> anyhow::Result<()> {
    use std::io::Write;
    let path = std::path::Path::new(file_path);
    let prefix = path
        .parent()
        .ok_or_else(|| anyhow::anyhow!("invalid path: {}", file_path))?;
    std::fs::create_dir_all(prefix)?;
    let mut f = std::fs::File::create(path)?;
    write!(f, "{}", data)?;
    Ok(())
}

pub fn vec_to_string<T: fmt::Display>(v: &[T]) -> String {
    let vs: Vec<String> = v.iter().map(|x| format!("{}", x)).collect();
    "[".to_string() + &vs.join(", ") + "]"
}

#[test]
fn test_next_value() {
    let args: Vec<String> = vec!["12".into(), "x".into()];
    let mut it = args.iter();
    let n: u32 = next_value(&mut it, "-g").unwrap();
    assert_eq!(n, 12);
    assert!(next_value::<u32>(&mut it, "-g").is_err());
    assert!(next_value::<u32>(&mut it, "-g").is_err()); // missing
}

#[test]
fn test_vec_to_string() {
    assert_eq!(vec_to_string(&[1, 2, 3]), "[1, 2, 3]");
    assert_eq!(vec_to_string::<u8>(&[]), "[]");
}
