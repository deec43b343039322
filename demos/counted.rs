use docargs::CommandLineParser;

const DOC: &str = "
Usage: counted --help
       counted -v...
       counted go [go]
       counted (--path=<path>)...
       counted <file> <file>

Try: counted -vvvvvvvvvv
     counted go go
     counted --path ./here --path ./there
     counted this.txt that.txt
";

fn main() {
    let parser = match CommandLineParser::new(DOC).build() {
        Ok(parser) => parser,
        Err(error) => {
            eprintln!("{error}");
            std::process::exit(2);
        }
    };

    let args = parser.parse();

    for (name, value) in args.iter() {
        println!("{name}: {value}");
    }
}
