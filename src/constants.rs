// Constants for the lexer and the persisted tables

/// Identifiers, keywords and numbers of this length or longer are rejected
pub const MAX_SYMBOL_LEN: usize = 16;

/// Width of the right-justified lexeme column in `.dyd` files
pub const LEXEME_WIDTH: usize = 16;

/// Width of the kind-code column in `.dyd` files
pub const KIND_WIDTH: usize = 2;

/// Width of every column in the `.pro` and `.var` tables
pub const TABLE_COLUMN_WIDTH: usize = 16;

/// Name of the synthetic procedure that owns top-level declarations
pub const ROOT_PROCEDURE: &str = "main";

/// Return type recorded for the synthetic root procedure
pub const ROOT_RETURN_TYPE: &str = "void";

/// The language's only data type
pub const INTEGER_TYPE: &str = "integer";
