/// The closed set of token kinds produced by [`super::Lexer`] (spec §4.1,
/// §6.1). Every reserved keyword also carries
/// [`TokenKind::keyword_usable_as_identifier`] `== true`; it is the
/// parser's job (§4.2) to decide, at each call site, whether a keyword
/// token plays the role of a keyword or of a plain identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum TokenKind {
    // Trivia
    Whitespace,
    LineComment,
    BlockComment,
    /// `/** ... */` — consumed by `doc`/`comment`/`rep` productions.
    DocComment,

    // Literals
    Ident,
    UnrestrictedName,
    IntDec,
    IntHex,
    IntBin,
    IntOct,
    Real,
    Str,

    // Punctuation
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Comma,
    Semicolon,
    Colon,
    ColonColon,
    ColonGt,
    ColonGtGt,
    ColonEq,
    ColonColonEq,
    Eq,
    Hash,
    At,
    Dot,
    DotDot,
    Star,
    StarStar,
    Slash,
    Percent,
    Plus,
    Minus,
    Bang,
    Tilde,
    Lt,
    LtEq,
    Gt,
    GtEq,
    EqEq,
    BangEq,
    EqEqEq,
    BangEqEq,
    Question,
    QuestionQuestion,

    // Keywords — every variant here is also a valid identifier (§4.2).
    KwPublic,
    KwPrivate,
    KwProtected,
    KwPackage,
    KwLibrary,
    KwStandard,
    KwImport,
    KwAlias,
    KwFor,
    KwNamespace,
    KwPart,
    KwItem,
    KwAttribute,
    KwAction,
    KwState,
    KwConstraint,
    KwRequirement,
    KwPort,
    KwConnection,
    KwConnect,
    KwBind,
    KwInterface,
    KwFlow,
    KwAllocation,
    KwCalc,
    KwCase,
    KwAnalysis,
    KwVerification,
    KwUse,
    KwView,
    KwViewpoint,
    KwRendering,
    KwMetadata,
    KwOccurrence,
    KwConcern,
    KwEnum,
    KwDef,
    KwAbstract,
    KwReadonly,
    KwDerived,
    KwRef,
    KwEnd,
    KwComposite,
    KwPortion,
    KwParallel,
    KwVariant,
    KwIn,
    KwOut,
    KwInout,
    KwSubtype,
    KwSubclassifier,
    KwSpecialization,
    KwSpecializes,
    KwSubclassification,
    KwSubset,
    KwSubsets,
    KwRedefinition,
    KwRedefines,
    KwReferences,
    KwDependency,
    KwConjugate,
    KwDisjoint,
    KwFrom,
    KwTo,
    KwTyped,
    KwBy,
    KwFeature,
    KwEntry,
    KwExit,
    KwDo,
    KwTransition,
    KwSuccession,
    KwFirst,
    KwThen,
    KwAccept,
    KwSend,
    KwVia,
    KwPerform,
    KwAssert,
    KwIf,
    KwElse,
    KwWhile,
    KwUntil,
    KwOf,
    KwAssign,
    KwAnd,
    KwOr,
    KwXor,
    KwNot,
    KwImplies,
    KwHastype,
    KwIstype,
    KwAs,
    KwMeta,
    KwAll,
    KwTrue,
    KwFalse,
    KwNull,
    KwSubject,
    KwActor,
    KwRequire,
    KwReturn,
    KwComment,
    KwDoc,
    KwAbout,
    KwLocale,
    KwLanguage,
    KwRep,

    Eof,
    /// A character the lexer could not classify, or the remainder of an
    /// unterminated literal past its recovery point.
    Error,
}

impl TokenKind {
    /// Every keyword can also be used as an identifier (§4.2). Plain
    /// identifiers trivially satisfy this too, which keeps `is_name_like`
    /// a single predicate for "can appear where `<identifier>` is
    /// expected".
    pub fn keyword_usable_as_identifier(self) -> bool {
        self.is_keyword() || matches!(self, TokenKind::Ident)
    }

    pub fn is_keyword(self) -> bool {
        let k = self as u16;
        k >= TokenKind::KwPublic as u16 && k <= TokenKind::KwRep as u16
    }

    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::Whitespace
                | TokenKind::LineComment
                | TokenKind::BlockComment
                | TokenKind::DocComment
        )
    }

    /// Look up the keyword kind for `text`, if any. Used by the lexer once
    /// it has scanned a maximal identifier-shaped run of characters.
    pub fn keyword_from_str(text: &str) -> Option<TokenKind> {
        use TokenKind::*;
        Some(match text {
            "public" => KwPublic,
            "private" => KwPrivate,
            "protected" => KwProtected,
            "package" => KwPackage,
            "library" => KwLibrary,
            "standard" => KwStandard,
            "import" => KwImport,
            "alias" => KwAlias,
            "for" => KwFor,
            "namespace" => KwNamespace,
            "part" => KwPart,
            "item" => KwItem,
            "attribute" => KwAttribute,
            "action" => KwAction,
            "state" => KwState,
            "constraint" => KwConstraint,
            "requirement" => KwRequirement,
            "port" => KwPort,
            "connection" => KwConnection,
            "connect" => KwConnect,
            "bind" => KwBind,
            "interface" => KwInterface,
            "flow" => KwFlow,
            "allocation" => KwAllocation,
            "calc" => KwCalc,
            "case" => KwCase,
            "analysis" => KwAnalysis,
            "verification" => KwVerification,
            "use" => KwUse,
            "view" => KwView,
            "viewpoint" => KwViewpoint,
            "rendering" => KwRendering,
            "metadata" => KwMetadata,
            "occurrence" => KwOccurrence,
            "concern" => KwConcern,
            "enum" => KwEnum,
            "def" => KwDef,
            "abstract" => KwAbstract,
            "readonly" => KwReadonly,
            "derived" => KwDerived,
            "ref" => KwRef,
            "end" => KwEnd,
            "composite" => KwComposite,
            "portion" => KwPortion,
            "parallel" => KwParallel,
            "variant" => KwVariant,
            "in" => KwIn,
            "out" => KwOut,
            "inout" => KwInout,
            "subtype" => KwSubtype,
            "subclassifier" => KwSubclassifier,
            "specialization" => KwSpecialization,
            "specializes" => KwSpecializes,
            "subclassification" => KwSubclassification,
            "subset" => KwSubset,
            "subsets" => KwSubsets,
            "redefinition" => KwRedefinition,
            "redefines" => KwRedefines,
            "references" => KwReferences,
            "dependency" => KwDependency,
            "conjugate" => KwConjugate,
            "disjoint" => KwDisjoint,
            "from" => KwFrom,
            "to" => KwTo,
            "typed" => KwTyped,
            "by" => KwBy,
            "feature" => KwFeature,
            "entry" => KwEntry,
            "exit" => KwExit,
            "do" => KwDo,
            "transition" => KwTransition,
            "succession" => KwSuccession,
            "first" => KwFirst,
            "then" => KwThen,
            "accept" => KwAccept,
            "send" => KwSend,
            "via" => KwVia,
            "perform" => KwPerform,
            "assert" => KwAssert,
            "if" => KwIf,
            "else" => KwElse,
            "while" => KwWhile,
            "until" => KwUntil,
            "of" => KwOf,
            "assign" => KwAssign,
            "and" => KwAnd,
            "or" => KwOr,
            "xor" => KwXor,
            "not" => KwNot,
            "implies" => KwImplies,
            "hastype" => KwHastype,
            "istype" => KwIstype,
            "as" => KwAs,
            "meta" => KwMeta,
            "all" => KwAll,
            "true" => KwTrue,
            "false" => KwFalse,
            "null" => KwNull,
            "subject" => KwSubject,
            "actor" => KwActor,
            "require" => KwRequire,
            "return" => KwReturn,
            "comment" => KwComment,
            "doc" => KwDoc,
            "about" => KwAbout,
            "locale" => KwLocale,
            "language" => KwLanguage,
            "rep" => KwRep,
            _ => return None,
        })
    }
}
