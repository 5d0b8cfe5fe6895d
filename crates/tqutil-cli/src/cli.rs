pub const USAGE: &str = "\
usage: tqutil [--help|--version|COMMAND]

Commands:
  tsid [COUNT]     Print COUNT (default 1) new time-sorted ids
  encode TEXT      Print TEXT (UTF-8 bytes) as Crockford Base32
  decode BASE32    Print decoded Base32 as UTF-8 text
  number BASE32    Print decoded Base32 as a decimal number

The TSID node is read from config/tqutil.toml (or $TQUTIL_CONFIG),
TQUTIL_TSID__NODE, or org.tquadrat.util.tsid.node; otherwise random.
";

/// What we decide to do based on CLI arguments
#[derive(PartialEq, Debug)]
pub enum Behavior {
    Help,
    Version,
    Tsid(usize),
    Encode(String),
    Decode(String),
    Number(String),
    Invalid(String),
}

pub fn parse<S>(args: impl IntoIterator<Item = S>) -> Behavior
where
    S: AsRef<str>,
{
    let args: Vec<String> = args.into_iter().map(|a| a.as_ref().to_owned()).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    match args.as_slice() {
        [] | ["--help"] | ["-h"] => Behavior::Help,
        ["--version"] => Behavior::Version,
        ["tsid"] => Behavior::Tsid(1),
        ["tsid", count] => match count.parse() {
            Ok(n) => Behavior::Tsid(n),
            Err(_) => Behavior::Invalid(format!("not a count: {count}")),
        },
        ["encode", text] => Behavior::Encode(text.to_string()),
        ["decode", text] => Behavior::Decode(text.to_string()),
        ["number", text] => Behavior::Number(text.to_string()),
        other => Behavior::Invalid(format!("unexpected arguments: {}", other.join(" "))),
    }
}
