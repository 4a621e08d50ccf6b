//! The node variant table.
//!
//! Tags are the wire tags and must stay stable within a major format
//! version. New variants go at the end.

use super::flags::{
    ArgumentsFlags, ArrayFlags, CallFlags, IntegerBaseFlags, InterpolatedStringFlags,
    KeywordHashFlags, LoopFlags, ParameterFlags, RangeFlags, RegularExpressionFlags, StringFlags,
    SymbolFlags,
};
use super::Node;
use crate::{FloatValue, IntegerValue, Location, Name, StringValue};

define_nodes! {
    /// `alias $new $old`
    AliasGlobalVariable(AliasGlobalVariableNode) = 1, visit_alias_global_variable_node {
        new_name: Box<Node>,
        old_name: Box<Node>,
        keyword_loc: Location,
    }
    /// `alias new old`
    AliasMethod(AliasMethodNode) = 2, visit_alias_method_node {
        new_name: Box<Node>,
        old_name: Box<Node>,
        keyword_loc: Location,
    }
    /// `pattern | pattern`
    AlternationPattern(AlternationPatternNode) = 3, visit_alternation_pattern_node {
        left: Box<Node>,
        right: Box<Node>,
        operator_loc: Location,
    }
    /// `left && right`, `left and right`
    And(AndNode) = 4, visit_and_node {
        left: Box<Node>,
        right: Box<Node>,
        operator_loc: Location,
    }
    /// Arguments of a call, `yield`, `super`, or jump.
    Arguments(ArgumentsNode) = 5, visit_arguments_node {
        flags: ArgumentsFlags,
        arguments: Vec<Node>,
    }
    /// `[1, 2]`, `%w[a b]`, or the implicit array of `return 1, 2`.
    Array(ArrayNode) = 6, visit_array_node {
        flags: ArrayFlags,
        elements: Vec<Node>,
        opening_loc: Option<Location>,
        closing_loc: Option<Location>,
    }
    /// `in [a, *b, c]`
    ArrayPattern(ArrayPatternNode) = 7, visit_array_pattern_node {
        constant: Option<Box<Node>>,
        requireds: Vec<Node>,
        rest: Option<Box<Node>>,
        posts: Vec<Node>,
        opening_loc: Option<Location>,
        closing_loc: Option<Location>,
    }
    /// `key => value`, `key: value`
    Assoc(AssocNode) = 8, visit_assoc_node {
        key: Box<Node>,
        value: Box<Node>,
        operator_loc: Option<Location>,
    }
    /// `**hash`
    AssocSplat(AssocSplatNode) = 9, visit_assoc_splat_node {
        value: Option<Box<Node>>,
        operator_loc: Location,
    }
    /// `$&`, `` $` ``, `$'`, `$+`
    BackReferenceRead(BackReferenceReadNode) = 10, visit_back_reference_read_node {
        name: Name,
    }
    /// `begin ... rescue ... else ... ensure ... end`, and bodies with rescue clauses.
    Begin(BeginNode) = 11, visit_begin_node {
        begin_keyword_loc: Option<Location>,
        statements: Option<Box<Node>>,
        rescue_clause: Option<Box<Node>>,
        else_clause: Option<Box<Node>>,
        ensure_clause: Option<Box<Node>>,
        end_keyword_loc: Option<Location>,
    }
    /// `&block` in an argument list.
    BlockArgument(BlockArgumentNode) = 12, visit_block_argument_node {
        expression: Option<Box<Node>>,
        operator_loc: Location,
    }
    /// `; x` block-local variable.
    BlockLocalVariable(BlockLocalVariableNode) = 13, visit_block_local_variable_node {
        flags: ParameterFlags,
        name: Name,
    }
    /// `{ |x| ... }`, `do |x| ... end`
    Block(BlockNode) = 14, visit_block_node {
        locals: Vec<Name>,
        parameters: Option<Box<Node>>,
        body: Option<Box<Node>>,
        opening_loc: Location,
        closing_loc: Location,
    }
    /// `&block` in a parameter list.
    BlockParameter(BlockParameterNode) = 15, visit_block_parameter_node {
        flags: ParameterFlags,
        name: Option<Name>,
        name_loc: Option<Location>,
        operator_loc: Location,
    }
    /// `|a, b; c|`
    BlockParameters(BlockParametersNode) = 16, visit_block_parameters_node {
        parameters: Option<Box<Node>>,
        locals: Vec<Node>,
        opening_loc: Option<Location>,
        closing_loc: Option<Location>,
    }
    Break(BreakNode) = 17, visit_break_node {
        arguments: Option<Box<Node>>,
        keyword_loc: Location,
    }
    /// `foo.bar &&= value`
    CallAndWrite(CallAndWriteNode) = 18, visit_call_and_write_node {
        flags: CallFlags,
        receiver: Option<Box<Node>>,
        call_operator_loc: Option<Location>,
        message_loc: Option<Location>,
        read_name: Name,
        write_name: Name,
        operator_loc: Location,
        value: Box<Node>,
    }
    /// A method call, including operator calls (`a + b`) and bare identifiers
    /// that did not resolve to a local.
    Call(CallNode) = 19, visit_call_node {
        flags: CallFlags,
        receiver: Option<Box<Node>>,
        call_operator_loc: Option<Location>,
        name: Name,
        message_loc: Option<Location>,
        opening_loc: Option<Location>,
        arguments: Option<Box<Node>>,
        closing_loc: Option<Location>,
        block: Option<Box<Node>>,
    }
    /// `foo.bar += value`
    CallOperatorWrite(CallOperatorWriteNode) = 20, visit_call_operator_write_node {
        flags: CallFlags,
        receiver: Option<Box<Node>>,
        call_operator_loc: Option<Location>,
        message_loc: Option<Location>,
        read_name: Name,
        write_name: Name,
        binary_operator: Name,
        binary_operator_loc: Location,
        value: Box<Node>,
    }
    /// `foo.bar ||= value`
    CallOrWrite(CallOrWriteNode) = 21, visit_call_or_write_node {
        flags: CallFlags,
        receiver: Option<Box<Node>>,
        call_operator_loc: Option<Location>,
        message_loc: Option<Location>,
        read_name: Name,
        write_name: Name,
        operator_loc: Location,
        value: Box<Node>,
    }
    /// `foo.bar, = 1`
    CallTarget(CallTargetNode) = 22, visit_call_target_node {
        flags: CallFlags,
        receiver: Box<Node>,
        call_operator_loc: Location,
        name: Name,
        message_loc: Location,
    }
    /// `in Integer => x`
    CapturePattern(CapturePatternNode) = 23, visit_capture_pattern_node {
        value: Box<Node>,
        target: Box<Node>,
        operator_loc: Location,
    }
    /// `case x in pattern ... end`
    CaseMatch(CaseMatchNode) = 24, visit_case_match_node {
        predicate: Option<Box<Node>>,
        conditions: Vec<Node>,
        else_clause: Option<Box<Node>>,
        case_keyword_loc: Location,
        end_keyword_loc: Location,
    }
    /// `case x when y ... end`
    Case(CaseNode) = 25, visit_case_node {
        predicate: Option<Box<Node>>,
        conditions: Vec<Node>,
        else_clause: Option<Box<Node>>,
        case_keyword_loc: Location,
        end_keyword_loc: Location,
    }
    Class(ClassNode) = 26, visit_class_node {
        locals: Vec<Name>,
        class_keyword_loc: Location,
        constant_path: Box<Node>,
        inheritance_operator_loc: Option<Location>,
        superclass: Option<Box<Node>>,
        body: Option<Box<Node>>,
        end_keyword_loc: Location,
        name: Name,
    }
    ClassVariableAndWrite(ClassVariableAndWriteNode) = 27, visit_class_variable_and_write_node {
        name: Name,
        name_loc: Location,
        operator_loc: Location,
        value: Box<Node>,
    }
    ClassVariableOperatorWrite(ClassVariableOperatorWriteNode) = 28, visit_class_variable_operator_write_node {
        name: Name,
        name_loc: Location,
        binary_operator_loc: Location,
        value: Box<Node>,
        binary_operator: Name,
    }
    ClassVariableOrWrite(ClassVariableOrWriteNode) = 29, visit_class_variable_or_write_node {
        name: Name,
        name_loc: Location,
        operator_loc: Location,
        value: Box<Node>,
    }
    ClassVariableRead(ClassVariableReadNode) = 30, visit_class_variable_read_node {
        name: Name,
    }
    ClassVariableTarget(ClassVariableTargetNode) = 31, visit_class_variable_target_node {
        name: Name,
    }
    ClassVariableWrite(ClassVariableWriteNode) = 32, visit_class_variable_write_node {
        name: Name,
        name_loc: Location,
        value: Box<Node>,
        operator_loc: Location,
    }
    ConstantAndWrite(ConstantAndWriteNode) = 33, visit_constant_and_write_node {
        name: Name,
        name_loc: Location,
        operator_loc: Location,
        value: Box<Node>,
    }
    ConstantOperatorWrite(ConstantOperatorWriteNode) = 34, visit_constant_operator_write_node {
        name: Name,
        name_loc: Location,
        binary_operator_loc: Location,
        value: Box<Node>,
        binary_operator: Name,
    }
    ConstantOrWrite(ConstantOrWriteNode) = 35, visit_constant_or_write_node {
        name: Name,
        name_loc: Location,
        operator_loc: Location,
        value: Box<Node>,
    }
    ConstantPathAndWrite(ConstantPathAndWriteNode) = 36, visit_constant_path_and_write_node {
        target: Box<Node>,
        operator_loc: Location,
        value: Box<Node>,
    }
    /// `Parent::Child`, `::Top`
    ConstantPath(ConstantPathNode) = 37, visit_constant_path_node {
        parent: Option<Box<Node>>,
        name: Option<Name>,
        delimiter_loc: Location,
        name_loc: Location,
    }
    ConstantPathOperatorWrite(ConstantPathOperatorWriteNode) = 38, visit_constant_path_operator_write_node {
        target: Box<Node>,
        binary_operator_loc: Location,
        value: Box<Node>,
        binary_operator: Name,
    }
    ConstantPathOrWrite(ConstantPathOrWriteNode) = 39, visit_constant_path_or_write_node {
        target: Box<Node>,
        operator_loc: Location,
        value: Box<Node>,
    }
    ConstantPathTarget(ConstantPathTargetNode) = 40, visit_constant_path_target_node {
        parent: Option<Box<Node>>,
        name: Option<Name>,
        delimiter_loc: Location,
        name_loc: Location,
    }
    ConstantPathWrite(ConstantPathWriteNode) = 41, visit_constant_path_write_node {
        target: Box<Node>,
        operator_loc: Location,
        value: Box<Node>,
    }
    ConstantRead(ConstantReadNode) = 42, visit_constant_read_node {
        name: Name,
    }
    ConstantTarget(ConstantTargetNode) = 43, visit_constant_target_node {
        name: Name,
    }
    ConstantWrite(ConstantWriteNode) = 44, visit_constant_write_node {
        name: Name,
        name_loc: Location,
        value: Box<Node>,
        operator_loc: Location,
    }
    /// Method definition, including endless (`def x = 1`) and singleton (`def self.x`) forms.
    Def(DefNode) = 45, visit_def_node {
        name: Name,
        name_loc: Location,
        receiver: Option<Box<Node>>,
        parameters: Option<Box<Node>>,
        body: Option<Box<Node>>,
        locals: Vec<Name>,
        def_keyword_loc: Location,
        operator_loc: Option<Location>,
        lparen_loc: Option<Location>,
        rparen_loc: Option<Location>,
        equal_loc: Option<Location>,
        end_keyword_loc: Option<Location>,
    }
    Defined(DefinedNode) = 46, visit_defined_node {
        lparen_loc: Option<Location>,
        value: Box<Node>,
        rparen_loc: Option<Location>,
        keyword_loc: Location,
    }
    Else(ElseNode) = 47, visit_else_node {
        else_keyword_loc: Location,
        statements: Option<Box<Node>>,
        end_keyword_loc: Option<Location>,
    }
    /// `#{...}` inside a string-like literal.
    EmbeddedStatements(EmbeddedStatementsNode) = 48, visit_embedded_statements_node {
        opening_loc: Location,
        statements: Option<Box<Node>>,
        closing_loc: Location,
    }
    /// `#@ivar`, `#$gvar`, `#@@cvar` inside a string-like literal.
    EmbeddedVariable(EmbeddedVariableNode) = 49, visit_embedded_variable_node {
        operator_loc: Location,
        variable: Box<Node>,
    }
    Ensure(EnsureNode) = 50, visit_ensure_node {
        ensure_keyword_loc: Location,
        statements: Option<Box<Node>>,
        end_keyword_loc: Location,
    }
    /// Wraps a best-effort partial child at a position where the parser recovered
    /// from an error.
    ErrorRecovery(ErrorRecoveryNode) = 51, visit_error_recovery_node {
        child: Option<Box<Node>>,
    }
    False(FalseNode) = 52, visit_false_node {}
    /// `in [*, x, *]`
    FindPattern(FindPatternNode) = 53, visit_find_pattern_node {
        constant: Option<Box<Node>>,
        left: Box<Node>,
        requireds: Vec<Node>,
        right: Box<Node>,
        opening_loc: Option<Location>,
        closing_loc: Option<Location>,
    }
    Float(FloatNode) = 54, visit_float_node {
        value: FloatValue,
    }
    For(ForNode) = 55, visit_for_node {
        index: Box<Node>,
        collection: Box<Node>,
        statements: Option<Box<Node>>,
        for_keyword_loc: Location,
        in_keyword_loc: Location,
        do_keyword_loc: Option<Location>,
        end_keyword_loc: Location,
    }
    /// `...` as an argument.
    ForwardingArguments(ForwardingArgumentsNode) = 56, visit_forwarding_arguments_node {}
    /// `...` as a parameter.
    ForwardingParameter(ForwardingParameterNode) = 57, visit_forwarding_parameter_node {}
    /// Bare `super`, forwarding the enclosing method's arguments.
    ForwardingSuper(ForwardingSuperNode) = 58, visit_forwarding_super_node {
        block: Option<Box<Node>>,
    }
    GlobalVariableAndWrite(GlobalVariableAndWriteNode) = 59, visit_global_variable_and_write_node {
        name: Name,
        name_loc: Location,
        operator_loc: Location,
        value: Box<Node>,
    }
    GlobalVariableOperatorWrite(GlobalVariableOperatorWriteNode) = 60, visit_global_variable_operator_write_node {
        name: Name,
        name_loc: Location,
        binary_operator_loc: Location,
        value: Box<Node>,
        binary_operator: Name,
    }
    GlobalVariableOrWrite(GlobalVariableOrWriteNode) = 61, visit_global_variable_or_write_node {
        name: Name,
        name_loc: Location,
        operator_loc: Location,
        value: Box<Node>,
    }
    GlobalVariableRead(GlobalVariableReadNode) = 62, visit_global_variable_read_node {
        name: Name,
    }
    GlobalVariableTarget(GlobalVariableTargetNode) = 63, visit_global_variable_target_node {
        name: Name,
    }
    GlobalVariableWrite(GlobalVariableWriteNode) = 64, visit_global_variable_write_node {
        name: Name,
        name_loc: Location,
        value: Box<Node>,
        operator_loc: Location,
    }
    Hash(HashNode) = 65, visit_hash_node {
        opening_loc: Location,
        elements: Vec<Node>,
        closing_loc: Location,
    }
    /// `in { a: 1, **rest }`
    HashPattern(HashPatternNode) = 66, visit_hash_pattern_node {
        constant: Option<Box<Node>>,
        elements: Vec<Node>,
        rest: Option<Box<Node>>,
        opening_loc: Option<Location>,
        closing_loc: Option<Location>,
    }
    /// `if`, `elsif`, modifier `if`, and the ternary operator.
    If(IfNode) = 67, visit_if_node {
        if_keyword_loc: Option<Location>,
        predicate: Box<Node>,
        then_keyword_loc: Option<Location>,
        statements: Option<Box<Node>>,
        subsequent: Option<Box<Node>>,
        end_keyword_loc: Option<Location>,
    }
    Imaginary(ImaginaryNode) = 68, visit_imaginary_node {
        numeric: Box<Node>,
    }
    /// Value omitted from a hash literal (`{ x: }`) or pattern.
    Implicit(ImplicitNode) = 69, visit_implicit_node {
        value: Box<Node>,
    }
    /// Trailing comma in a block parameter list or multiple assignment (`a, = b`).
    ImplicitRest(ImplicitRestNode) = 70, visit_implicit_rest_node {}
    /// `in pattern then ...` clause of a `case ... in`.
    In(InNode) = 71, visit_in_node {
        pattern: Box<Node>,
        statements: Option<Box<Node>>,
        in_loc: Location,
        then_loc: Option<Location>,
    }
    IndexAndWrite(IndexAndWriteNode) = 72, visit_index_and_write_node {
        flags: CallFlags,
        receiver: Option<Box<Node>>,
        call_operator_loc: Option<Location>,
        opening_loc: Location,
        arguments: Option<Box<Node>>,
        closing_loc: Location,
        block: Option<Box<Node>>,
        operator_loc: Location,
        value: Box<Node>,
    }
    IndexOperatorWrite(IndexOperatorWriteNode) = 73, visit_index_operator_write_node {
        flags: CallFlags,
        receiver: Option<Box<Node>>,
        call_operator_loc: Option<Location>,
        opening_loc: Location,
        arguments: Option<Box<Node>>,
        closing_loc: Location,
        block: Option<Box<Node>>,
        binary_operator: Name,
        binary_operator_loc: Location,
        value: Box<Node>,
    }
    IndexOrWrite(IndexOrWriteNode) = 74, visit_index_or_write_node {
        flags: CallFlags,
        receiver: Option<Box<Node>>,
        call_operator_loc: Option<Location>,
        opening_loc: Location,
        arguments: Option<Box<Node>>,
        closing_loc: Location,
        block: Option<Box<Node>>,
        operator_loc: Location,
        value: Box<Node>,
    }
    IndexTarget(IndexTargetNode) = 75, visit_index_target_node {
        flags: CallFlags,
        receiver: Box<Node>,
        opening_loc: Location,
        arguments: Option<Box<Node>>,
        closing_loc: Location,
        block: Option<Box<Node>>,
    }
    InstanceVariableAndWrite(InstanceVariableAndWriteNode) = 76, visit_instance_variable_and_write_node {
        name: Name,
        name_loc: Location,
        operator_loc: Location,
        value: Box<Node>,
    }
    InstanceVariableOperatorWrite(InstanceVariableOperatorWriteNode) = 77, visit_instance_variable_operator_write_node {
        name: Name,
        name_loc: Location,
        binary_operator_loc: Location,
        value: Box<Node>,
        binary_operator: Name,
    }
    InstanceVariableOrWrite(InstanceVariableOrWriteNode) = 78, visit_instance_variable_or_write_node {
        name: Name,
        name_loc: Location,
        operator_loc: Location,
        value: Box<Node>,
    }
    InstanceVariableRead(InstanceVariableReadNode) = 79, visit_instance_variable_read_node {
        name: Name,
    }
    InstanceVariableTarget(InstanceVariableTargetNode) = 80, visit_instance_variable_target_node {
        name: Name,
    }
    InstanceVariableWrite(InstanceVariableWriteNode) = 81, visit_instance_variable_write_node {
        name: Name,
        name_loc: Location,
        value: Box<Node>,
        operator_loc: Location,
    }
    /// Integer literal with its exact value.
    Integer(IntegerNode) = 82, visit_integer_node {
        flags: IntegerBaseFlags,
        value: IntegerValue,
    }
    InterpolatedRegularExpression(InterpolatedRegularExpressionNode) = 83, visit_interpolated_regular_expression_node {
        flags: RegularExpressionFlags,
        opening_loc: Location,
        parts: Vec<Node>,
        closing_loc: Location,
    }
    /// String with interpolation, or adjacent literals joined by juxtaposition.
    InterpolatedString(InterpolatedStringNode) = 84, visit_interpolated_string_node {
        flags: InterpolatedStringFlags,
        opening_loc: Option<Location>,
        parts: Vec<Node>,
        closing_loc: Option<Location>,
    }
    InterpolatedSymbol(InterpolatedSymbolNode) = 85, visit_interpolated_symbol_node {
        opening_loc: Option<Location>,
        parts: Vec<Node>,
        closing_loc: Option<Location>,
    }
    InterpolatedXString(InterpolatedXStringNode) = 86, visit_interpolated_x_string_node {
        opening_loc: Location,
        parts: Vec<Node>,
        closing_loc: Location,
    }
    /// Bare `it` inside a parameterless block.
    ItLocalVariableRead(ItLocalVariableReadNode) = 87, visit_it_local_variable_read_node {}
    /// Implicit parameters of a block that reads `it`.
    ItParameters(ItParametersNode) = 88, visit_it_parameters_node {}
    /// Brace-less hash in an argument list (`foo(a: 1)`).
    KeywordHash(KeywordHashNode) = 89, visit_keyword_hash_node {
        flags: KeywordHashFlags,
        elements: Vec<Node>,
    }
    /// `**opts`
    KeywordRestParameter(KeywordRestParameterNode) = 90, visit_keyword_rest_parameter_node {
        flags: ParameterFlags,
        name: Option<Name>,
        name_loc: Option<Location>,
        operator_loc: Location,
    }
    /// `->(x) { ... }`
    Lambda(LambdaNode) = 91, visit_lambda_node {
        locals: Vec<Name>,
        operator_loc: Location,
        opening_loc: Location,
        closing_loc: Location,
        parameters: Option<Box<Node>>,
        body: Option<Box<Node>>,
    }
    LocalVariableAndWrite(LocalVariableAndWriteNode) = 92, visit_local_variable_and_write_node {
        name_loc: Location,
        operator_loc: Location,
        value: Box<Node>,
        name: Name,
        depth: u32,
    }
    LocalVariableOperatorWrite(LocalVariableOperatorWriteNode) = 93, visit_local_variable_operator_write_node {
        name_loc: Location,
        binary_operator_loc: Location,
        value: Box<Node>,
        name: Name,
        binary_operator: Name,
        depth: u32,
    }
    LocalVariableOrWrite(LocalVariableOrWriteNode) = 94, visit_local_variable_or_write_node {
        name_loc: Location,
        operator_loc: Location,
        value: Box<Node>,
        name: Name,
        depth: u32,
    }
    /// Read of a local; `depth` counts the block scopes crossed to reach its declaration.
    LocalVariableRead(LocalVariableReadNode) = 95, visit_local_variable_read_node {
        name: Name,
        depth: u32,
    }
    LocalVariableTarget(LocalVariableTargetNode) = 96, visit_local_variable_target_node {
        name: Name,
        depth: u32,
    }
    LocalVariableWrite(LocalVariableWriteNode) = 97, visit_local_variable_write_node {
        name: Name,
        depth: u32,
        name_loc: Location,
        value: Box<Node>,
        operator_loc: Location,
    }
    /// `value in pattern`
    MatchPredicate(MatchPredicateNode) = 98, visit_match_predicate_node {
        value: Box<Node>,
        pattern: Box<Node>,
        operator_loc: Location,
    }
    /// `value => pattern`
    MatchRequired(MatchRequiredNode) = 99, visit_match_required_node {
        value: Box<Node>,
        pattern: Box<Node>,
        operator_loc: Location,
    }
    /// `/(?<name>.)/ =~ s`: the call plus the locals its named captures declare.
    MatchWrite(MatchWriteNode) = 100, visit_match_write_node {
        call: Box<Node>,
        targets: Vec<Node>,
    }
    /// Placeholder for a required element that is absent.
    Missing(MissingNode) = 101, visit_missing_node {}
    Module(ModuleNode) = 102, visit_module_node {
        locals: Vec<Name>,
        module_keyword_loc: Location,
        constant_path: Box<Node>,
        body: Option<Box<Node>>,
        end_keyword_loc: Location,
        name: Name,
    }
    /// `(a, b)` on the left of a multiple assignment, or in a parameter list.
    MultiTarget(MultiTargetNode) = 103, visit_multi_target_node {
        lefts: Vec<Node>,
        rest: Option<Box<Node>>,
        rights: Vec<Node>,
        lparen_loc: Option<Location>,
        rparen_loc: Option<Location>,
    }
    /// `a, *b, c = value`
    MultiWrite(MultiWriteNode) = 104, visit_multi_write_node {
        lefts: Vec<Node>,
        rest: Option<Box<Node>>,
        rights: Vec<Node>,
        lparen_loc: Option<Location>,
        rparen_loc: Option<Location>,
        operator_loc: Location,
        value: Box<Node>,
    }
    Next(NextNode) = 105, visit_next_node {
        arguments: Option<Box<Node>>,
        keyword_loc: Location,
    }
    Nil(NilNode) = 106, visit_nil_node {}
    /// `**nil`
    NoKeywordsParameter(NoKeywordsParameterNode) = 107, visit_no_keywords_parameter_node {
        operator_loc: Location,
        keyword_loc: Location,
    }
    /// Implicit parameters of a block that reads `_1`..`_9`.
    NumberedParameters(NumberedParametersNode) = 108, visit_numbered_parameters_node {
        maximum: u32,
    }
    /// `$1`, `$2`, ...
    NumberedReferenceRead(NumberedReferenceReadNode) = 109, visit_numbered_reference_read_node {
        number: u32,
    }
    OptionalKeywordParameter(OptionalKeywordParameterNode) = 110, visit_optional_keyword_parameter_node {
        flags: ParameterFlags,
        name: Name,
        name_loc: Location,
        value: Box<Node>,
    }
    OptionalParameter(OptionalParameterNode) = 111, visit_optional_parameter_node {
        flags: ParameterFlags,
        name: Name,
        name_loc: Location,
        operator_loc: Location,
        value: Box<Node>,
    }
    /// `left || right`, `left or right`
    Or(OrNode) = 112, visit_or_node {
        left: Box<Node>,
        right: Box<Node>,
        operator_loc: Location,
    }
    Parameters(ParametersNode) = 113, visit_parameters_node {
        requireds: Vec<Node>,
        optionals: Vec<Node>,
        rest: Option<Box<Node>>,
        posts: Vec<Node>,
        keywords: Vec<Node>,
        keyword_rest: Option<Box<Node>>,
        block: Option<Box<Node>>,
    }
    Parentheses(ParenthesesNode) = 114, visit_parentheses_node {
        body: Option<Box<Node>>,
        opening_loc: Location,
        closing_loc: Location,
    }
    /// `^(expr)` in a pattern.
    PinnedExpression(PinnedExpressionNode) = 115, visit_pinned_expression_node {
        expression: Box<Node>,
        operator_loc: Location,
        lparen_loc: Location,
        rparen_loc: Location,
    }
    /// `^var` in a pattern.
    PinnedVariable(PinnedVariableNode) = 116, visit_pinned_variable_node {
        variable: Box<Node>,
        operator_loc: Location,
    }
    /// `END { ... }`
    PostExecution(PostExecutionNode) = 117, visit_post_execution_node {
        statements: Option<Box<Node>>,
        keyword_loc: Location,
        opening_loc: Location,
        closing_loc: Location,
    }
    /// `BEGIN { ... }`
    PreExecution(PreExecutionNode) = 118, visit_pre_execution_node {
        statements: Option<Box<Node>>,
        keyword_loc: Location,
        opening_loc: Location,
        closing_loc: Location,
    }
    /// Root of every tree.
    Program(ProgramNode) = 119, visit_program_node {
        locals: Vec<Name>,
        statements: Box<Node>,
    }
    Range(RangeNode) = 120, visit_range_node {
        flags: RangeFlags,
        left: Option<Box<Node>>,
        right: Option<Box<Node>>,
        operator_loc: Location,
    }
    /// `3r`, `1.5r`: stored as an exact fraction.
    Rational(RationalNode) = 121, visit_rational_node {
        flags: IntegerBaseFlags,
        numerator: IntegerValue,
        denominator: IntegerValue,
    }
    Redo(RedoNode) = 122, visit_redo_node {}
    RegularExpression(RegularExpressionNode) = 123, visit_regular_expression_node {
        flags: RegularExpressionFlags,
        opening_loc: Location,
        content_loc: Location,
        closing_loc: Location,
        unescaped: StringValue,
    }
    RequiredKeywordParameter(RequiredKeywordParameterNode) = 124, visit_required_keyword_parameter_node {
        flags: ParameterFlags,
        name: Name,
        name_loc: Location,
    }
    RequiredParameter(RequiredParameterNode) = 125, visit_required_parameter_node {
        flags: ParameterFlags,
        name: Name,
    }
    /// `expr rescue fallback`
    RescueModifier(RescueModifierNode) = 126, visit_rescue_modifier_node {
        expression: Box<Node>,
        keyword_loc: Location,
        rescue_expression: Box<Node>,
    }
    /// `rescue Foo, Bar => e` clause; later clauses chain through `subsequent`.
    Rescue(RescueNode) = 127, visit_rescue_node {
        keyword_loc: Location,
        exceptions: Vec<Node>,
        operator_loc: Option<Location>,
        reference: Option<Box<Node>>,
        statements: Option<Box<Node>>,
        subsequent: Option<Box<Node>>,
    }
    /// `*args`
    RestParameter(RestParameterNode) = 128, visit_rest_parameter_node {
        flags: ParameterFlags,
        name: Option<Name>,
        name_loc: Option<Location>,
        operator_loc: Location,
    }
    Retry(RetryNode) = 129, visit_retry_node {}
    Return(ReturnNode) = 130, visit_return_node {
        keyword_loc: Location,
        arguments: Option<Box<Node>>,
    }
    SelfKeyword(SelfNode) = 131, visit_self_node {}
    /// `class << self ... end`
    SingletonClass(SingletonClassNode) = 132, visit_singleton_class_node {
        locals: Vec<Name>,
        class_keyword_loc: Location,
        operator_loc: Location,
        expression: Box<Node>,
        body: Option<Box<Node>>,
        end_keyword_loc: Location,
    }
    SourceEncoding(SourceEncodingNode) = 133, visit_source_encoding_node {}
    /// `__FILE__`, carrying the configured file path.
    SourceFile(SourceFileNode) = 134, visit_source_file_node {
        flags: StringFlags,
        filepath: StringValue,
    }
    SourceLine(SourceLineNode) = 135, visit_source_line_node {}
    /// `*args` in an argument list, array literal, or assignment.
    Splat(SplatNode) = 136, visit_splat_node {
        operator_loc: Location,
        expression: Option<Box<Node>>,
    }
    Statements(StatementsNode) = 137, visit_statements_node {
        body: Vec<Node>,
    }
    /// String literal without interpolation. Also `?a` and heredoc bodies.
    String(StringNode) = 138, visit_string_node {
        flags: StringFlags,
        opening_loc: Option<Location>,
        content_loc: Location,
        closing_loc: Option<Location>,
        unescaped: StringValue,
    }
    Super(SuperNode) = 139, visit_super_node {
        keyword_loc: Location,
        lparen_loc: Option<Location>,
        arguments: Option<Box<Node>>,
        rparen_loc: Option<Location>,
        block: Option<Box<Node>>,
    }
    Symbol(SymbolNode) = 140, visit_symbol_node {
        flags: SymbolFlags,
        opening_loc: Option<Location>,
        value_loc: Option<Location>,
        closing_loc: Option<Location>,
        unescaped: StringValue,
    }
    True(TrueNode) = 141, visit_true_node {}
    Undef(UndefNode) = 142, visit_undef_node {
        names: Vec<Node>,
        keyword_loc: Location,
    }
    Unless(UnlessNode) = 143, visit_unless_node {
        keyword_loc: Location,
        predicate: Box<Node>,
        then_keyword_loc: Option<Location>,
        statements: Option<Box<Node>>,
        else_clause: Option<Box<Node>>,
        end_keyword_loc: Option<Location>,
    }
    Until(UntilNode) = 144, visit_until_node {
        flags: LoopFlags,
        keyword_loc: Location,
        closing_loc: Option<Location>,
        predicate: Box<Node>,
        statements: Option<Box<Node>>,
    }
    When(WhenNode) = 145, visit_when_node {
        keyword_loc: Location,
        conditions: Vec<Node>,
        then_keyword_loc: Option<Location>,
        statements: Option<Box<Node>>,
    }
    While(WhileNode) = 146, visit_while_node {
        flags: LoopFlags,
        keyword_loc: Location,
        closing_loc: Option<Location>,
        predicate: Box<Node>,
        statements: Option<Box<Node>>,
    }
    /// `` `cmd` ``, `%x{cmd}`
    XString(XStringNode) = 147, visit_x_string_node {
        flags: StringFlags,
        opening_loc: Location,
        content_loc: Location,
        closing_loc: Location,
        unescaped: StringValue,
    }
    Yield(YieldNode) = 148, visit_yield_node {
        keyword_loc: Location,
        lparen_loc: Option<Location>,
        arguments: Option<Box<Node>>,
        rparen_loc: Option<Location>,
    }
}
