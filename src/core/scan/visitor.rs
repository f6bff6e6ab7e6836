use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use anyhow::Result;
use swc_common::{Span, Spanned};
use swc_ecma_ast::{
    CallExpr, Callee, Expr, ImportDecl, ImportSpecifier, JSXAttr, JSXAttrValue, JSXText,
    MemberProp, ObjectLit, Prop, PropName, PropOrSpread,
};
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::data::CallArgument;
use crate::core::parsers::jsx::{ParsedSource, parse_source};
use crate::core::scan::{CandidateCall, SwcScanner};
use crate::utils::unquote;

pub(super) struct Collected {
    pub calls: Vec<CandidateCall>,
    pub origins: HashMap<String, PathBuf>,
}

/// Parse `code` and collect member calls and import origins.
///
/// Offsets in the result are shifted by `base`, the position of `code`
/// within the enclosing file.
pub(super) fn collect(
    code: String,
    path: &Path,
    tsx: bool,
    base: usize,
    scanner: &SwcScanner,
) -> Result<Collected> {
    let parsed = parse_source(code.clone(), path, tsx)?;
    let mut collector = CallCollector {
        code: &code,
        parsed: &parsed,
        base,
        path,
        scanner,
        calls: Vec::new(),
        origins: HashMap::new(),
    };
    parsed.module.visit_with(&mut collector);
    Ok(Collected {
        calls: collector.calls,
        origins: collector.origins,
    })
}

/// Byte ranges of JSX text and JSX string attribute values.
pub(super) fn template_ranges(parsed: &ParsedSource) -> Vec<(usize, usize)> {
    let mut finder = TemplateRangeFinder {
        parsed,
        ranges: Vec::new(),
    };
    parsed.module.visit_with(&mut finder);
    finder.ranges
}

struct CallCollector<'a> {
    code: &'a str,
    parsed: &'a ParsedSource,
    base: usize,
    path: &'a Path,
    scanner: &'a SwcScanner,
    calls: Vec<CandidateCall>,
    origins: HashMap<String, PathBuf>,
}

impl CallCollector<'_> {
    fn local_range(&self, span: Span) -> (usize, usize) {
        (self.parsed.offset(span.lo), self.parsed.offset(span.hi))
    }

    fn source_text(&self, span: Span) -> &str {
        let (start, end) = self.local_range(span);
        self.code.get(start..end).unwrap_or_default()
    }

    fn object_arguments(&self, object: &ObjectLit) -> Vec<CallArgument> {
        object
            .props
            .iter()
            .filter_map(|prop| match prop {
                PropOrSpread::Prop(prop) => match &**prop {
                    Prop::KeyValue(kv) => {
                        let name = match &kv.key {
                            PropName::Ident(ident) => ident.sym.to_string(),
                            PropName::Str(s) => s.value.to_string_lossy().to_string(),
                            _ => return None,
                        };
                        Some(CallArgument {
                            name,
                            value_text: unquote(self.source_text(kv.value.span())).to_string(),
                        })
                    }
                    Prop::Shorthand(ident) => Some(CallArgument {
                        name: ident.sym.to_string(),
                        value_text: ident.sym.to_string(),
                    }),
                    _ => None,
                },
                PropOrSpread::Spread(_) => None,
            })
            .collect()
    }
}

impl Visit for CallCollector<'_> {
    fn visit_import_decl(&mut self, node: &ImportDecl) {
        if node.type_only {
            return;
        }
        let Some(specifier) = node.src.value.as_str() else {
            return;
        };
        let Some(origin) = self.scanner.resolve_specifier(self.path, specifier) else {
            return;
        };
        for spec in &node.specifiers {
            let local = match spec {
                ImportSpecifier::Named(named) if !named.is_type_only => &named.local,
                ImportSpecifier::Named(_) => continue,
                ImportSpecifier::Default(default) => &default.local,
                ImportSpecifier::Namespace(ns) => &ns.local,
            };
            self.origins.insert(local.sym.to_string(), origin.clone());
        }
    }

    fn visit_call_expr(&mut self, node: &CallExpr) {
        if let Callee::Expr(expr) = &node.callee
            && let Expr::Member(member) = &**expr
            && let Expr::Ident(qualifier) = &*member.obj
            && let MemberProp::Ident(name) = &member.prop
        {
            let arguments = match node.args.first() {
                Some(arg) if arg.spread.is_none() => match &*arg.expr {
                    Expr::Object(object) => self.object_arguments(object),
                    _ => Vec::new(),
                },
                _ => Vec::new(),
            };
            let (start, end) = self.local_range(node.span);
            self.calls.push(CandidateCall {
                callee_qualifier: qualifier.sym.to_string(),
                callee_name: name.sym.to_string(),
                arguments,
                start: self.base + start,
                end: self.base + end,
            });
        }

        node.visit_children_with(self);
    }
}

struct TemplateRangeFinder<'a> {
    parsed: &'a ParsedSource,
    ranges: Vec<(usize, usize)>,
}

impl TemplateRangeFinder<'_> {
    fn push(&mut self, span: Span) {
        self.ranges
            .push((self.parsed.offset(span.lo), self.parsed.offset(span.hi)));
    }
}

impl Visit for TemplateRangeFinder<'_> {
    fn visit_jsx_text(&mut self, node: &JSXText) {
        self.push(node.span);
    }

    fn visit_jsx_attr(&mut self, node: &JSXAttr) {
        if let Some(JSXAttrValue::Str(s)) = &node.value {
            self.push(s.span);
        }
        node.visit_children_with(self);
    }
}
