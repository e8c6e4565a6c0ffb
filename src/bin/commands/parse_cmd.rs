use anyhow::Result;
use urlscan::parse_url;

pub fn cmd_parse(input: String) -> Result<()> {
    match parse_url(input.as_bytes(), true) {
        Ok(url) => {
            println!("scheme:   {}", url.scheme_str());
            println!("userinfo: {}", url.slice(url.userinfo));
            println!("host:     {}", url.host_str());
            if url.port != 0 {
                println!("port:     {}", url.port);
            }
            println!("path:     {}", url.slice(url.path));
            println!("query:    {}", url.slice(url.query));
            println!("fragment: {}", url.slice(url.fragment));
            Ok(())
        }
        Err(e) => {
            eprintln!("parse error: {e}");
            std::process::exit(1);
        }
    }
}
