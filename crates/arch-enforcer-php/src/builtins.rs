//! PHP runtime symbol table.
//!
//! Strict layers may reference classes and functions the PHP runtime
//! provides without listing them. PHP resolves class and function names
//! case-insensitively, so lookups here are case-insensitive too.

use std::collections::HashSet;
use std::sync::OnceLock;

use arch_enforcer_core::BuiltinSymbols;

/// Core classes, interfaces, enums and attributes (lowercase).
const CLASSES: &[&str] = &[
    "__php_incomplete_class",
    "allowdynamicproperties",
    "appenditerator",
    "argumentcounterror",
    "arithmeticerror",
    "arrayaccess",
    "arrayiterator",
    "arrayobject",
    "assertionerror",
    "attribute",
    "backedenum",
    "badfunctioncallexception",
    "badmethodcallexception",
    "cachingiterator",
    "callbackfilteriterator",
    "closure",
    "collator",
    "compileerror",
    "countable",
    "dateinterval",
    "dateperiod",
    "datetime",
    "datetimeimmutable",
    "datetimeinterface",
    "datetimezone",
    "directory",
    "directoryiterator",
    "divisionbyzeroerror",
    "domainexception",
    "domdocument",
    "domelement",
    "domnode",
    "domxpath",
    "emptyiterator",
    "error",
    "errorexception",
    "exception",
    "fiber",
    "fibererror",
    "filesystemiterator",
    "filteriterator",
    "generator",
    "globiterator",
    "infiniteiterator",
    "internaliterator",
    "intldateformatter",
    "invalidargumentexception",
    "iterator",
    "iteratoraggregate",
    "iteratoriterator",
    "jsonexception",
    "jsonserializable",
    "lengthexception",
    "limititerator",
    "locale",
    "logicexception",
    "multipleiterator",
    "norewinditerator",
    "normalizer",
    "numberformatter",
    "outeriterator",
    "outofboundsexception",
    "outofrangeexception",
    "overflowexception",
    "override",
    "parentiterator",
    "parseerror",
    "pdo",
    "pdoexception",
    "pdostatement",
    "php_user_filter",
    "rangeexception",
    "recursivearrayiterator",
    "recursivecachingiterator",
    "recursivecallbackfilteriterator",
    "recursivedirectoryiterator",
    "recursivefilteriterator",
    "recursiveiterator",
    "recursiveiteratoriterator",
    "recursiveregexiterator",
    "recursivetreeiterator",
    "reflectionclass",
    "reflectionenum",
    "reflectionexception",
    "reflectionfunction",
    "reflectionmethod",
    "reflectionnamedtype",
    "reflectionobject",
    "reflectionparameter",
    "reflectionproperty",
    "regexiterator",
    "returntypewillchange",
    "runtimeexception",
    "seekableiterator",
    "sensitiveparameter",
    "serializable",
    "simplexmlelement",
    "spldoublylinkedlist",
    "splfileinfo",
    "splfileobject",
    "splfixedarray",
    "splheap",
    "splmaxheap",
    "splminheap",
    "splobjectstorage",
    "splobserver",
    "splpriorityqueue",
    "splqueue",
    "splstack",
    "splsubject",
    "spltempfileobject",
    "stdclass",
    "stringable",
    "throwable",
    "traversable",
    "typeerror",
    "underflowexception",
    "unexpectedvalueexception",
    "unhandledmatcherror",
    "unitenum",
    "valueerror",
    "weakmap",
    "weakreference",
    "xmlreader",
    "xmlwriter",
];

/// Core classes that live in a namespace, without the leading separator
/// (lowercase).
const NAMESPACED_CLASSES: &[&str] = &[
    "dom\\document",
    "dom\\element",
    "dom\\htmldocument",
    "dom\\node",
    "dom\\xmldocument",
    "pdo\\mysql",
    "pdo\\pgsql",
    "pdo\\sqlite",
    "random\\brokenrandomengineerror",
    "random\\cryptosafeengine",
    "random\\engine",
    "random\\engine\\mt19937",
    "random\\engine\\pcgoneseq128xslrr64",
    "random\\engine\\secure",
    "random\\engine\\xoshiro256starstar",
    "random\\intervalboundary",
    "random\\randomerror",
    "random\\randomexception",
    "random\\randomizer",
];

/// Commonly used core functions (lowercase).
const FUNCTIONS: &[&str] = &[
    "abs",
    "array_chunk",
    "array_column",
    "array_combine",
    "array_diff",
    "array_diff_key",
    "array_fill",
    "array_fill_keys",
    "array_filter",
    "array_flip",
    "array_intersect",
    "array_intersect_key",
    "array_is_list",
    "array_key_exists",
    "array_key_first",
    "array_key_last",
    "array_keys",
    "array_map",
    "array_merge",
    "array_merge_recursive",
    "array_pad",
    "array_pop",
    "array_push",
    "array_reduce",
    "array_replace",
    "array_reverse",
    "array_search",
    "array_shift",
    "array_slice",
    "array_splice",
    "array_sum",
    "array_unique",
    "array_unshift",
    "array_values",
    "array_walk",
    "arsort",
    "asort",
    "assert",
    "basename",
    "bin2hex",
    "call_user_func",
    "call_user_func_array",
    "ceil",
    "class_exists",
    "compact",
    "count",
    "ctype_digit",
    "date",
    "debug_backtrace",
    "dirname",
    "explode",
    "file_exists",
    "file_get_contents",
    "file_put_contents",
    "filter_var",
    "floor",
    "fclose",
    "fopen",
    "fread",
    "fwrite",
    "func_get_args",
    "function_exists",
    "get_class",
    "get_object_vars",
    "get_parent_class",
    "gettype",
    "hash",
    "hash_hmac",
    "htmlspecialchars",
    "implode",
    "in_array",
    "intdiv",
    "interface_exists",
    "intval",
    "is_array",
    "is_bool",
    "is_callable",
    "is_dir",
    "is_file",
    "is_float",
    "is_int",
    "is_iterable",
    "is_null",
    "is_numeric",
    "is_object",
    "is_readable",
    "is_string",
    "is_subclass_of",
    "is_writable",
    "iterator_to_array",
    "json_decode",
    "json_encode",
    "krsort",
    "ksort",
    "lcfirst",
    "ltrim",
    "max",
    "mb_strlen",
    "mb_strtolower",
    "mb_strtoupper",
    "mb_substr",
    "md5",
    "method_exists",
    "microtime",
    "min",
    "mkdir",
    "mt_rand",
    "number_format",
    "ob_get_clean",
    "ob_start",
    "password_hash",
    "password_verify",
    "pathinfo",
    "preg_match",
    "preg_match_all",
    "preg_quote",
    "preg_replace",
    "preg_replace_callback",
    "preg_split",
    "print_r",
    "property_exists",
    "random_bytes",
    "random_int",
    "range",
    "rawurlencode",
    "realpath",
    "round",
    "rsort",
    "rtrim",
    "scandir",
    "serialize",
    "sha1",
    "sort",
    "sprintf",
    "spl_autoload_register",
    "spl_object_hash",
    "spl_object_id",
    "str_contains",
    "str_ends_with",
    "str_pad",
    "str_repeat",
    "str_replace",
    "str_split",
    "str_starts_with",
    "strcasecmp",
    "strcmp",
    "strlen",
    "strpos",
    "strrpos",
    "strtolower",
    "strtotime",
    "strtoupper",
    "strval",
    "substr",
    "substr_count",
    "time",
    "trait_exists",
    "trigger_error",
    "trim",
    "uasort",
    "ucfirst",
    "ucwords",
    "uksort",
    "uniqid",
    "unlink",
    "unserialize",
    "urlencode",
    "usort",
    "var_dump",
    "var_export",
    "vsprintf",
];

fn core_symbols() -> &'static HashSet<&'static str> {
    static SYMBOLS: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SYMBOLS.get_or_init(|| {
        CLASSES
            .iter()
            .chain(NAMESPACED_CLASSES)
            .chain(FUNCTIONS)
            .copied()
            .collect()
    })
}

/// Symbol table of PHP runtime classes and functions.
///
/// The built-in table holds core names, including namespaced ones such as
/// `Random\Randomizer`. Names registered with [`PhpBuiltins::with_symbols`]
/// (extension classes, for instance) are matched the same way.
#[derive(Debug, Clone, Default)]
pub struct PhpBuiltins {
    extra: HashSet<String>,
}

impl PhpBuiltins {
    /// Creates a table with the core symbols only.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds names that the runtime provides through extensions.
    #[must_use]
    pub fn with_symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extra.extend(
            symbols
                .into_iter()
                .map(|s| normalize(s.as_ref()))
                .filter(|s| !s.is_empty()),
        );
        self
    }
}

fn normalize(name: &str) -> String {
    name.trim_start_matches('\\').to_ascii_lowercase()
}

impl BuiltinSymbols for PhpBuiltins {
    fn is_builtin(&self, name: &str) -> bool {
        let name = normalize(name);
        core_symbols().contains(name.as_str()) || self.extra.contains(&name)
    }
}
