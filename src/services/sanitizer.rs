/// Doubles every single quote so the text is safe inside a quote-delimited
/// literal. Not idempotent: apply once per field.
pub fn sanitize_input(input: &str) -> String {
    input.replace('\'', "''")
}
