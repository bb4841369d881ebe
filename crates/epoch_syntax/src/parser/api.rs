/// Parse one source file into its declarations and scopes.
///
/// This is the main public entrypoint for parsing.
///
/// ## Parameters
/// - `source`: Full text of the file.
/// - `file`: Identity attached to every token, scope and diagnostic.
///
/// ## Errors
/// Returns a [`ParseFailure`] with the first syntax error and whatever was registered before it.
#[tracing::instrument(skip_all, fields(file = %file, source_len = source.len()))]
pub fn parse_file(source: &str, file: FileRef) -> Result<FileSymbols, ParseFailure> {
    Parser::new(source, file).parse()
}
