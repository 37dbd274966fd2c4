//! Type expressions as written in the manifest.
//!
//! Accepted forms: primitives (`int`), qualified names
//! (`java.util.List<java.lang.String>`), nested generics
//! (`Outer<A>.Inner<B>`), arrays (`String[]`), Java wildcards
//! (`? extends Number`), Kotlin projections (`*`, `out T`, `in T`) and a
//! trailing `?` for nullable Kotlin types.
//!
//! A simple name resolves to a type variable in scope first, then to a
//! class the target language imports by default, then to a class in the
//! file's own package.

use codegentle_common::{
    ArrayTypeName, ClassName, PackageName, ParameterizedTypeName, PrimitiveTypeName, TypeRef,
    TypeVariableName, WildcardTypeName,
};

use crate::Language;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Ident(String),
    Dot,
    Lt,
    Gt,
    Comma,
    Brackets,
    Question,
    Star,
    Amp,
    Colon,
}

fn tokenize(expr: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let mut chars = expr.chars().peekable();
    while let Some(c) = chars.next() {
        let token = match c {
            c if c.is_whitespace() => continue,
            '.' => Token::Dot,
            '<' => Token::Lt,
            '>' => Token::Gt,
            ',' => Token::Comma,
            '?' => Token::Question,
            '*' => Token::Star,
            '&' => Token::Amp,
            ':' => Token::Colon,
            '[' => match chars.next() {
                Some(']') => Token::Brackets,
                _ => return Err("'[' must be followed by ']'".to_string()),
            },
            c if c.is_alphabetic() || c == '_' || c == '$' => {
                let mut ident = String::from(c);
                while let Some(&next) = chars.peek()
                    && (next.is_alphanumeric() || next == '_' || next == '$')
                {
                    ident.push(next);
                    chars.next();
                }
                Token::Ident(ident)
            }
            other => return Err(format!("unexpected character '{other}'")),
        };
        tokens.push(token);
    }
    if tokens.is_empty() {
        return Err("type expression is empty".to_string());
    }
    Ok(tokens)
}

/// Resolves type expressions for one file and the type variables in scope.
#[derive(Debug, Clone)]
pub struct TypeResolver {
    language: Language,
    package: PackageName,
    type_variables: Vec<String>,
}

impl TypeResolver {
    pub fn new(language: Language, package: PackageName) -> Self {
        Self {
            language,
            package,
            type_variables: Vec::new(),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn package(&self) -> &PackageName {
        &self.package
    }

    /// A resolver that also sees the type variables declared by `decls`.
    pub fn with_type_variables(&self, decls: &[String]) -> Self {
        let mut scoped = self.clone();
        scoped
            .type_variables
            .extend(decls.iter().filter_map(|decl| declared_name(decl)));
        scoped
    }

    pub fn resolve(&self, expr: &str) -> Result<TypeRef, String> {
        let mut parser = Parser::new(self, tokenize(expr)?);
        let type_ref = parser.parse_type()?;
        parser.finish()?;
        Ok(type_ref)
    }

    /// A class name, e.g. for an annotation.
    pub fn resolve_class(&self, expr: &str) -> Result<ClassName, String> {
        let type_ref = self.resolve(expr)?;
        type_ref
            .type_name()
            .as_class_name()
            .cloned()
            .ok_or_else(|| format!("'{expr}' is not a class"))
    }

    /// `T`, `T extends A & B` or `T : A`.
    pub fn type_variable(&self, decl: &str) -> Result<TypeVariableName, String> {
        let mut parser = Parser::new(self, tokenize(decl)?);
        let name = parser.ident()?;
        let mut bounds = Vec::new();
        if parser.eat_keyword("extends") || parser.eat(&Token::Colon) {
            loop {
                bounds.push(parser.parse_type()?);
                if !parser.eat(&Token::Amp) {
                    break;
                }
            }
        }
        parser.finish()?;
        TypeVariableName::with_bounds(name, bounds).map_err(|e| e.to_string())
    }

    fn simple(&self, name: &str) -> TypeRef {
        if self.type_variables.iter().any(|v| v == name) {
            return TypeVariableName::new(name).into();
        }
        if let Some(primitive) = PrimitiveTypeName::from_keyword(name) {
            return primitive.into();
        }
        self.simple_class(name).into()
    }

    fn simple_class(&self, name: &str) -> ClassName {
        self.language
            .builtin_class(name)
            .unwrap_or_else(|| ClassName::new(self.package.clone(), name))
    }

    /// `java.util.Map.Entry` by package convention; `Map.Entry` as a nested
    /// class of a resolvable simple name.
    fn dotted(&self, segments: &[String]) -> Result<ClassName, String> {
        let starts_upper = segments[0].chars().next().is_some_and(char::is_uppercase);
        if starts_upper {
            if self.type_variables.contains(&segments[0]) {
                return Err(format!("type variable '{}' has no members", segments[0]));
            }
            let mut class_name = self.simple_class(&segments[0]);
            for segment in &segments[1..] {
                class_name = class_name.nested_class(segment.clone());
            }
            return Ok(class_name);
        }
        ClassName::best_guess(&segments.join(".")).map_err(|e| e.to_string())
    }
}

/// The declared name of `T extends Bound`.
fn declared_name(decl: &str) -> Option<String> {
    decl.split(|c: char| c.is_whitespace() || c == ':')
        .find(|part| !part.is_empty())
        .map(str::to_string)
}

struct Parser<'r> {
    resolver: &'r TypeResolver,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'r> Parser<'r> {
    fn new(resolver: &'r TypeResolver, tokens: Vec<Token>) -> Self {
        Self {
            resolver,
            tokens,
            pos: 0,
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_at(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset)
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if matches!(self.peek(), Some(Token::Ident(ident)) if ident == keyword) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn ident(&mut self) -> Result<String, String> {
        match self.tokens.get(self.pos) {
            Some(Token::Ident(ident)) => {
                self.pos += 1;
                Ok(ident.clone())
            }
            Some(other) => Err(format!("expected a name, found {}", describe(other))),
            None => Err("expected a name, found end of input".to_string()),
        }
    }

    fn finish(&self) -> Result<(), String> {
        match self.peek() {
            None => Ok(()),
            Some(token) => Err(format!("unexpected {}", describe(token))),
        }
    }

    fn parse_type(&mut self) -> Result<TypeRef, String> {
        let mut type_ref = self.parse_base()?;
        loop {
            if self.eat(&Token::Brackets) {
                type_ref = ArrayTypeName::of(type_ref).map_err(|e| e.to_string())?.into();
            } else if self.eat(&Token::Question) {
                type_ref = type_ref.nullable();
            } else {
                return Ok(type_ref);
            }
        }
    }

    fn parse_base(&mut self) -> Result<TypeRef, String> {
        let mut segments = vec![self.ident()?];
        while self.peek() == Some(&Token::Dot) {
            self.pos += 1;
            segments.push(self.ident()?);
        }
        if segments.len() == 1 && self.peek() != Some(&Token::Lt) {
            return Ok(self.resolver.simple(&segments[0]));
        }

        let raw = if segments.len() == 1 {
            if PrimitiveTypeName::from_keyword(&segments[0]).is_some() {
                return Err(format!("primitive '{}' cannot take type arguments", segments[0]));
            }
            if self.resolver.type_variables.contains(&segments[0]) {
                return Err(format!("type variable '{}' cannot take type arguments", segments[0]));
            }
            self.resolver.simple_class(&segments[0])
        } else {
            self.resolver.dotted(&segments)?
        };
        if !self.eat(&Token::Lt) {
            return Ok(raw.into());
        }

        let arguments = self.parse_arguments()?;
        let mut parameterized =
            ParameterizedTypeName::new(raw, arguments).map_err(|e| e.to_string())?;
        while self.eat(&Token::Dot) {
            let name = self.ident()?;
            let arguments = if self.eat(&Token::Lt) {
                self.parse_arguments()?
            } else {
                Vec::new()
            };
            parameterized = parameterized
                .nested_class(&name, arguments)
                .map_err(|e| e.to_string())?;
        }
        Ok(parameterized.into())
    }

    /// Arguments after `<`, consuming the closing `>`.
    fn parse_arguments(&mut self) -> Result<Vec<TypeRef>, String> {
        let mut arguments = vec![self.parse_argument()?];
        while self.eat(&Token::Comma) {
            arguments.push(self.parse_argument()?);
        }
        if !self.eat(&Token::Gt) {
            return Err(match self.peek() {
                Some(token) => format!("expected '>', found {}", describe(token)),
                None => "unclosed '<'".to_string(),
            });
        }
        Ok(arguments)
    }

    fn parse_argument(&mut self) -> Result<TypeRef, String> {
        if self.eat(&Token::Star) {
            return Ok(WildcardTypeName::unbounded().into());
        }
        if self.eat(&Token::Question) {
            return if self.eat_keyword("extends") {
                self.subtype_of()
            } else if self.eat_keyword("super") {
                self.supertype_of()
            } else {
                Ok(WildcardTypeName::unbounded().into())
            };
        }
        let is_variance = matches!(self.peek_at(1), Some(Token::Ident(_)) | Some(Token::Question));
        if is_variance && self.eat_keyword("out") {
            return self.subtype_of();
        }
        if is_variance && self.eat_keyword("in") {
            return self.supertype_of();
        }
        self.parse_type()
    }

    fn subtype_of(&mut self) -> Result<TypeRef, String> {
        let bound = self.parse_type()?;
        Ok(WildcardTypeName::subtype_of(bound)
            .map_err(|e| e.to_string())?
            .into())
    }

    fn supertype_of(&mut self) -> Result<TypeRef, String> {
        let bound = self.parse_type()?;
        Ok(WildcardTypeName::supertype_of(bound)
            .map_err(|e| e.to_string())?
            .into())
    }
}

fn describe(token: &Token) -> String {
    match token {
        Token::Ident(ident) => format!("'{ident}'"),
        Token::Dot => "'.'".to_string(),
        Token::Lt => "'<'".to_string(),
        Token::Gt => "'>'".to_string(),
        Token::Comma => "','".to_string(),
        Token::Brackets => "'[]'".to_string(),
        Token::Question => "'?'".to_string(),
        Token::Star => "'*'".to_string(),
        Token::Amp => "'&'".to_string(),
        Token::Colon => "':'".to_string(),
    }
}
