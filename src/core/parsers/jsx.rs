use std::path::Path;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use swc_common::{BytePos, FileName, Globals, SourceMap};
use swc_ecma_ast::Module;
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};

/// A parsed module plus what is needed to map spans back to byte offsets.
pub struct ParsedSource {
    pub module: Module,
    start_pos: BytePos,
}

impl ParsedSource {
    /// Byte offset of `pos` in the parsed code.
    pub fn offset(&self, pos: BytePos) -> usize {
        pos.0.saturating_sub(self.start_pos.0) as usize
    }
}

/// Whether files with this extension may contain JSX.
///
/// Plain `.js` is parsed as TSX as well: it has no `<T>expr` assertions that
/// TSX mode would misread, and React projects commonly put JSX in it.
pub fn allows_jsx(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("tsx" | "jsx" | "js" | "mjs" | "cjs")
    )
}

/// Parse JS/TS source code into a module AST.
///
/// Each call gets its own `SourceMap`, so this is safe to run from many
/// threads at once.
pub fn parse_source(code: String, file_path: &Path, tsx: bool) -> Result<ParsedSource> {
    use swc_common::GLOBALS;

    GLOBALS.set(&Globals::new(), || {
        let source_map: Arc<SourceMap> = Default::default();
        let source_file =
            source_map.new_source_file(FileName::Real(file_path.to_path_buf()).into(), code);

        let syntax = Syntax::Typescript(TsSyntax {
            tsx,
            ..Default::default()
        });

        let mut parser = Parser::new(syntax, StringInput::from(&*source_file), None);

        let module = parser
            .parse_module()
            .map_err(|e| anyhow!("Failed to parse {}: {:?}", file_path.display(), e.kind()))?;

        Ok(ParsedSource {
            module,
            start_pos: source_file.start_pos,
        })
    })
}
