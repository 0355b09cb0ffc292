use sable_diagnostics::{DiagnosticSink, ReportCache, SourceMap, TerminalEmitter};
use sable_syntax::{Lexer, Parser};

fn main() -> std::io::Result<()> {
    let code = "int a = 123;\nfloat b = 1.5 * a; @\n";
    println!("Tokens for: {:?}", code);

    let mut sources = SourceMap::new();
    let id = sources.add(code, "demo.sable");

    for token in Lexer::new(id, code) {
        println!("  {}", token);
    }

    let mut sink = DiagnosticSink::new();
    let status = Parser::new(Lexer::new(id, code), &mut sink).parse();
    println!("\nParse status: {:?}\n", status);

    let mut cache = ReportCache::new(&sources);
    cache.register(id);

    let mut emitter = TerminalEmitter::new(std::io::stdout());
    sink.report(&mut emitter, &cache)
}
