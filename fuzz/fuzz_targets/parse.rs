#![no_main]

use std::sync::Arc;

use epoch_syntax::lexer::Lexer;
use epoch_syntax::parser::parse_file;
use epoch_syntax::source::SourceFile;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        let file = Arc::new(SourceFile::new("fuzz.epoch"));
        // Fuzz the lexer with deep lookahead
        let mut lexer = Lexer::new(s, Arc::clone(&file));
        let _ = lexer.peek(16);
        lexer.consume(4);
        let _ = lexer.count();
        // Fuzz the recognizers
        let _ = parse_file(s, file);
    }
});
