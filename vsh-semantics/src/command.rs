// This file is part of vsh, a POSIX-style interactive shell.
// Copyright (C) 2026 the vsh authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! The executor: walks the syntax tree and runs it.
//!
//! Dispatch is by node kind. Simple commands expand their words and run as
//! a function call, an in-process builtin, or a forked external command;
//! compound commands recurse. Every produced exit status is recorded in
//! [`Env::exit_status`] (`$?`).
//!
//! Results are `ControlFlow`: `Break(Divert)` unwinds the tree walk for
//! `return` (caught at the function-call boundary) and `exit` (caught by
//! the read-eval loop). The fork discipline for externals follows the job
//! control model: each child enters its own process group, takes the
//! terminal when it is the foreground job of an interactive shell, resets
//! its signal dispositions, and applies assignments and redirections
//! before `exec`.

use crate::expansion;
use crate::job;
use crate::pipeline;
use crate::redir;
use itertools::Itertools;
use nix::libc;
use nix::unistd::{execve, execvp, fork, getpid, setpgid, ForkResult, Pid};
use std::ffi::CString;
use std::io::Write;
use std::ops::ControlFlow::{Break, Continue};
use std::rc::Rc;
use vsh_env::function::Function;
use vsh_env::job::Job;
use vsh_env::semantics::{Divert, ExitStatus, Result};
use vsh_env::{signal, terminal, Env};
use vsh_syntax::arena::Arena;
use vsh_syntax::parser;
use vsh_syntax::parser::lex::Lexer;
use vsh_syntax::syntax::{Node, Redir, SimpleCommand};

/// Maximum nesting of function calls and sourced scripts.
const MAX_NESTING: u32 = 64;

/// Executes a node, updating `$?`.
pub fn execute<'a>(env: &mut Env, arena: &'a Arena, node: &Node<'a>) -> Result {
    let result = match *node {
        Node::Simple(ref simple) => exec_simple(env, arena, simple),
        Node::Pipeline(ref p) => pipeline::execute(env, arena, p),
        Node::And(left, right) => {
            let status = execute(env, arena, left)?;
            if status.is_successful() {
                execute(env, arena, right)
            } else {
                Continue(status)
            }
        }
        Node::Or(left, right) => {
            let status = execute(env, arena, left)?;
            if status.is_successful() {
                Continue(status)
            } else {
                execute(env, arena, right)
            }
        }
        Node::Sequence(left, right) => {
            execute(env, arena, left)?;
            execute(env, arena, right)
        }
        Node::Background(child) => exec_background(env, arena, child),
        Node::Negate(child) => {
            let status = execute(env, arena, child)?;
            Continue(if status.is_successful() {
                ExitStatus::FAILURE
            } else {
                ExitStatus::SUCCESS
            })
        }
        Node::Subshell(child) => exec_subshell(env, arena, child),
        Node::Block(child) => execute_optional(env, arena, child),
        Node::If(if_node) => {
            let condition = execute_optional(env, arena, if_node.condition)?;
            if condition.is_successful() {
                execute_optional(env, arena, if_node.then_body)
            } else if if_node.else_body.is_some() {
                execute_optional(env, arena, if_node.else_body)
            } else {
                Continue(ExitStatus::SUCCESS)
            }
        }
        Node::While(while_node) => {
            let mut status = ExitStatus::SUCCESS;
            while execute_optional(env, arena, while_node.condition)?.is_successful() {
                status = execute_optional(env, arena, while_node.body)?;
            }
            Continue(status)
        }
        Node::For(for_node) => {
            let mut status = ExitStatus::SUCCESS;
            'words: for word in for_node.words {
                let values = match expansion::expand_word(env, arena, word) {
                    Ok(values) => values,
                    Err(error) => {
                        eprintln!("vsh: {error}");
                        status = ExitStatus::FAILURE;
                        break 'words;
                    }
                };
                for value in values {
                    env.variables.set(for_node.name, value, false);
                    status = execute_optional(env, arena, for_node.body)?;
                }
            }
            Continue(status)
        }
        Node::FunctionDef(def) => {
            let body = def.body.map(|b| b.to_string()).unwrap_or_default();
            env.functions.define(Function::new(def.name, body));
            Continue(ExitStatus::SUCCESS)
        }
    };

    if let Continue(status) = result {
        env.exit_status = status;
    }
    result
}

/// Executes an optional node; an absent node succeeds without touching
/// `$?`.
pub fn execute_optional<'a>(env: &mut Env, arena: &'a Arena, node: Option<&Node<'a>>) -> Result {
    match node {
        Some(node) => execute(env, arena, node),
        None => Continue(ExitStatus::SUCCESS),
    }
}

/// Converts an executor result into the status a child process exits with.
pub(crate) fn flatten(result: Result, env: &Env) -> ExitStatus {
    match result {
        Continue(status) => status,
        Break(divert) => divert.exit_status().unwrap_or(env.exit_status),
    }
}

/// Terminates a forked child without running the parent's cleanup.
pub(crate) fn exit_child(status: ExitStatus) -> ! {
    let _ = std::io::stdout().flush();
    let _ = std::io::stderr().flush();
    unsafe { libc::_exit(status.0) }
}

// ---- simple commands ----

fn exec_simple<'a>(env: &mut Env, arena: &'a Arena, simple: &SimpleCommand<'a>) -> Result {
    // A command with no words applies its assignments to the shell itself,
    // unexported.
    if simple.words.is_empty() {
        for assign in simple.assigns {
            match expansion::expand_parameters(env, assign.value, arena) {
                Ok(value) => env.variables.set(assign.name, value, false),
                Err(error) => {
                    eprintln!("vsh: {error}");
                    return Continue(ExitStatus::FAILURE);
                }
            }
        }
        return Continue(ExitStatus::SUCCESS);
    }

    let fields = match expand_fields(env, arena, simple.words) {
        Ok(fields) => fields,
        Err(status) => return Continue(status),
    };
    let Some(name) = fields.first() else {
        return Continue(ExitStatus::SUCCESS);
    };

    if let Some(function) = env.functions.get(name) {
        return call_function(env, arena, &function, &fields[1..], simple.redirs);
    }

    if let Some(builtin) = env.builtin(name) {
        let args: Vec<String> = fields.iter().map(|f| f.to_string()).collect();
        let mut guard = match redir::apply_saving(simple.redirs) {
            Ok(guard) => guard,
            Err(error) => {
                eprintln!("vsh: {error}");
                return Continue(ExitStatus::FAILURE);
            }
        };
        let result = (builtin.execute)(env, &args);
        guard.restore();
        return result;
    }

    exec_external(env, arena, simple, &fields)
}

/// Expands every argument word, flattening glob multiplications.
fn expand_fields<'a>(
    env: &mut Env,
    arena: &'a Arena,
    words: &[&str],
) -> std::result::Result<Vec<&'a str>, ExitStatus> {
    let mut fields = Vec::with_capacity(words.len());
    for word in words {
        match expansion::expand_word(env, arena, word) {
            Ok(mut expanded) => fields.append(&mut expanded),
            Err(error) => {
                eprintln!("vsh: {error}");
                return Err(ExitStatus::FAILURE);
            }
        }
    }
    Ok(fields)
}

fn exec_external<'a>(
    env: &mut Env,
    arena: &'a Arena,
    simple: &SimpleCommand<'a>,
    fields: &[&'a str],
) -> Result {
    match unsafe { fork() } {
        Err(errno) => {
            eprintln!("vsh: fork: {errno}");
            Continue(ExitStatus::FAILURE)
        }
        Ok(ForkResult::Child) => {
            let _ = setpgid(Pid::from_raw(0), Pid::from_raw(0));
            if env.interactive {
                let _ = terminal::give_terminal_to(getpid());
            }
            signal::reset_signals_for_child();

            // Command-local assignments become exported variables of the
            // child only.
            for assign in simple.assigns {
                match expansion::expand_parameters(env, assign.value, arena) {
                    Ok(value) => env.variables.set(assign.name, value, true),
                    Err(error) => {
                        eprintln!("vsh: {error}");
                        exit_child(ExitStatus::FAILURE);
                    }
                }
            }

            if let Err(error) = redir::apply(simple.redirs) {
                eprintln!("vsh: {error}");
                exit_child(ExitStatus::FAILURE);
            }

            exec_program_or_exit(env, fields)
        }
        Ok(ForkResult::Parent { child }) => {
            // Race guard: the child does the same on its side.
            let _ = setpgid(child, child);
            let command = fields.iter().join(" ");
            let id = env.jobs.add(Job::new(child, vec![child], command, true));
            Continue(job::wait_foreground(env, id))
        }
    }
}

/// Execs `fields` in the current (child) process: a direct exec of the
/// name first, then a PATH search. Exits 127 when not found, 126 on any
/// other exec failure.
pub(crate) fn exec_program_or_exit(env: &Env, fields: &[&str]) -> ! {
    let args: Vec<CString> = fields
        .iter()
        .filter_map(|f| CString::new(*f).ok())
        .collect();
    if args.len() != fields.len() || args.is_empty() {
        eprintln!("vsh: invalid command name");
        exit_child(ExitStatus::NOT_FOUND);
    }

    let environ = env.variables.environ();
    let _ = execve(&args[0], &args, &environ);
    let errno = match execvp(&args[0], &args) {
        Err(errno) => errno,
        Ok(infallible) => match infallible {},
    };

    eprintln!("vsh: {}: {}", fields[0], errno.desc());
    if errno == nix::errno::Errno::ENOENT {
        exit_child(ExitStatus::NOT_FOUND);
    }
    exit_child(ExitStatus::NOEXEC);
}

// ---- functions ----

fn call_function<'a>(
    env: &mut Env,
    arena: &'a Arena,
    function: &Rc<Function>,
    args: &[&str],
    redirs: Option<&Redir<'_>>,
) -> Result {
    if env.script_depth >= MAX_NESTING {
        eprintln!("vsh: {}: nesting too deep", function.name);
        return Continue(ExitStatus::FAILURE);
    }

    let mut guard = match redir::apply_saving(redirs) {
        Ok(guard) => guard,
        Err(error) => {
            eprintln!("vsh: {error}");
            return Continue(ExitStatus::FAILURE);
        }
    };

    let saved_params = std::mem::replace(
        &mut env.positional_params,
        args.iter().map(|a| a.to_string()).collect(),
    );
    env.script_depth += 1;

    // The stored body is the canonical printout of the definition; parse
    // it into the live arena and run it.
    let result = match Lexer::new(&function.body, arena).tokenize() {
        Ok(tokens) => match parser::parse(tokens, arena) {
            Ok(node) => execute_optional(env, arena, node),
            Err(error) => {
                eprintln!("vsh: {}: {}", function.name, error);
                Continue(ExitStatus::ERROR)
            }
        },
        Err(error) => {
            eprintln!("vsh: {}: {}", function.name, error);
            Continue(ExitStatus::ERROR)
        }
    };

    env.script_depth -= 1;
    env.positional_params = saved_params;
    guard.restore();

    // `return` unwinds to here.
    match result {
        Break(Divert::Return(status)) => Continue(status.unwrap_or(env.exit_status)),
        other => other,
    }
}

// ---- background and subshell ----

fn exec_background<'a>(env: &mut Env, arena: &'a Arena, child: &Node<'a>) -> Result {
    match unsafe { fork() } {
        Err(errno) => {
            eprintln!("vsh: fork: {errno}");
            Continue(ExitStatus::FAILURE)
        }
        Ok(ForkResult::Child) => {
            let _ = setpgid(Pid::from_raw(0), Pid::from_raw(0));
            signal::reset_signals_for_child();
            let result = execute(env, arena, child);
            exit_child(flatten(result, env));
        }
        Ok(ForkResult::Parent { child: pid }) => {
            let _ = setpgid(pid, pid);
            let id = env
                .jobs
                .add(Job::new(pid, vec![pid], child.to_string(), false));
            eprintln!("[{id}] {pid}");
            Continue(ExitStatus::SUCCESS)
        }
    }
}

fn exec_subshell<'a>(env: &mut Env, arena: &'a Arena, child: Option<&Node<'a>>) -> Result {
    match unsafe { fork() } {
        Err(errno) => {
            eprintln!("vsh: fork: {errno}");
            Continue(ExitStatus::FAILURE)
        }
        Ok(ForkResult::Child) => {
            let _ = setpgid(Pid::from_raw(0), Pid::from_raw(0));
            if env.interactive {
                let _ = terminal::give_terminal_to(getpid());
            }
            signal::reset_signals_for_child();
            let result = execute_optional(env, arena, child);
            exit_child(flatten(result, env));
        }
        Ok(ForkResult::Parent { child: pid }) => {
            let _ = setpgid(pid, pid);
            let command = child.map(|c| format!("({c})")).unwrap_or_default();
            let id = env.jobs.add(Job::new(pid, vec![pid], command, true));
            Continue(job::wait_foreground(env, id))
        }
    }
}

// ---- pipeline stages ----

/// Runs one stage of a multi-command pipeline in the already-forked child
/// and exits with its status. Builtins run here, in the child, and cannot
/// affect the parent shell.
pub(crate) fn exec_stage_and_exit<'a>(env: &mut Env, arena: &'a Arena, node: &Node<'a>) -> ! {
    if let Node::Simple(simple) = node {
        for assign in simple.assigns {
            match expansion::expand_parameters(env, assign.value, arena) {
                Ok(value) => env.variables.set(assign.name, value, true),
                Err(error) => {
                    eprintln!("vsh: {error}");
                    exit_child(ExitStatus::FAILURE);
                }
            }
        }

        if let Err(error) = redir::apply(simple.redirs) {
            eprintln!("vsh: {error}");
            exit_child(ExitStatus::FAILURE);
        }

        let fields = match expand_fields(env, arena, simple.words) {
            Ok(fields) => fields,
            Err(status) => exit_child(status),
        };
        let Some(name) = fields.first() else {
            exit_child(ExitStatus::SUCCESS);
        };

        if let Some(function) = env.functions.get(name) {
            let result = call_function(env, arena, &function, &fields[1..], None);
            exit_child(flatten(result, env));
        }
        if let Some(builtin) = env.builtin(name) {
            let args: Vec<String> = fields.iter().map(|f| f.to_string()).collect();
            let result = (builtin.execute)(env, &args);
            exit_child(flatten(result, env));
        }
        exec_program_or_exit(env, &fields);
    }

    let result = execute(env, arena, node);
    exit_child(flatten(result, env));
}

#[cfg(test)]
mod tests {
    use super::*;
    use vsh_env::builtin::Builtin;

    fn builtin(execute: vsh_env::builtin::Main) -> Builtin {
        Builtin {
            execute,
            synopsis: "",
            description: "",
        }
    }

    fn succeed(_env: &mut Env, _args: &[String]) -> Result {
        Continue(ExitStatus::SUCCESS)
    }

    fn fail(_env: &mut Env, _args: &[String]) -> Result {
        Continue(ExitStatus::FAILURE)
    }

    /// Appends its arguments to the MARKS variable.
    fn mark(env: &mut Env, args: &[String]) -> Result {
        let mut marks = env.variables.get("MARKS").unwrap_or("").to_string();
        for arg in &args[1..] {
            marks.push_str(arg);
            marks.push(';');
        }
        env.variables.set("MARKS", &marks, false);
        Continue(ExitStatus::SUCCESS)
    }

    /// Succeeds while decrementing N, failing once it reaches zero.
    fn countdown(env: &mut Env, _args: &[String]) -> Result {
        let n: i32 = env
            .variables
            .get("N")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        if n <= 0 {
            return Continue(ExitStatus::FAILURE);
        }
        env.variables.set("N", &(n - 1).to_string(), false);
        Continue(ExitStatus::SUCCESS)
    }

    fn do_return(_env: &mut Env, args: &[String]) -> Result {
        let status = args.get(1).and_then(|a| a.parse().ok()).map(ExitStatus);
        Break(Divert::Return(status))
    }

    fn do_exit(_env: &mut Env, args: &[String]) -> Result {
        let status = args.get(1).and_then(|a| a.parse().ok()).map(ExitStatus);
        Break(Divert::Exit(status))
    }

    fn test_env() -> Env {
        let mut env = Env::with_no_variables("vsh");
        env.builtins.insert("true", builtin(succeed));
        env.builtins.insert("false", builtin(fail));
        env.builtins.insert("mark", builtin(mark));
        env.builtins.insert("countdown", builtin(countdown));
        env.builtins.insert("return", builtin(do_return));
        env.builtins.insert("exit", builtin(do_exit));
        env
    }

    fn run(env: &mut Env, line: &str) -> Result {
        let arena = Arena::new();
        let tokens = Lexer::new(line, &arena).tokenize().unwrap();
        let node = parser::parse(tokens, &arena).unwrap();
        execute_optional(env, &arena, node)
    }

    fn marks(env: &Env) -> String {
        env.variables.get("MARKS").unwrap_or("").to_string()
    }

    #[test]
    fn and_short_circuits() {
        let mut env = test_env();
        assert_eq!(run(&mut env, "true && mark a"), Continue(ExitStatus::SUCCESS));
        assert_eq!(marks(&env), "a;");
        assert_eq!(run(&mut env, "false && mark b"), Continue(ExitStatus::FAILURE));
        assert_eq!(marks(&env), "a;");
    }

    #[test]
    fn or_short_circuits() {
        let mut env = test_env();
        assert_eq!(run(&mut env, "true || mark a"), Continue(ExitStatus::SUCCESS));
        assert_eq!(marks(&env), "");
        assert_eq!(run(&mut env, "false || mark b"), Continue(ExitStatus::SUCCESS));
        assert_eq!(marks(&env), "b;");
    }

    #[test]
    fn and_or_chain() {
        let mut env = test_env();
        run(&mut env, "true && mark yes || mark no");
        assert_eq!(marks(&env), "yes;");
        env.variables.set("MARKS", "", false);
        run(&mut env, "false && mark yes || mark no");
        assert_eq!(marks(&env), "no;");
    }

    #[test]
    fn sequence_runs_both_and_returns_the_right_status() {
        let mut env = test_env();
        assert_eq!(run(&mut env, "mark a; true"), Continue(ExitStatus::SUCCESS));
        assert_eq!(run(&mut env, "true; false"), Continue(ExitStatus::FAILURE));
        assert_eq!(marks(&env), "a;");
    }

    #[test]
    fn negate_inverts() {
        let mut env = test_env();
        assert_eq!(run(&mut env, "! true"), Continue(ExitStatus::FAILURE));
        assert_eq!(run(&mut env, "! false"), Continue(ExitStatus::SUCCESS));
    }

    #[test]
    fn exit_status_is_recorded() {
        let mut env = test_env();
        run(&mut env, "false");
        assert_eq!(env.exit_status, ExitStatus::FAILURE);
        run(&mut env, "true");
        assert_eq!(env.exit_status, ExitStatus::SUCCESS);
    }

    #[test]
    fn bare_assignment_sets_an_unexported_variable() {
        let mut env = test_env();
        assert_eq!(run(&mut env, "FOO=bar"), Continue(ExitStatus::SUCCESS));
        assert_eq!(env.variables.get("FOO"), Some("bar"));
        assert!(!env.variables.is_exported("FOO"));
    }

    #[test]
    fn assignment_value_is_expanded() {
        let mut env = test_env();
        run(&mut env, "A=x");
        run(&mut env, "B=$A/y");
        assert_eq!(env.variables.get("B"), Some("x/y"));
    }

    #[test]
    fn words_are_expanded_before_running() {
        let mut env = test_env();
        run(&mut env, "FOO=bar");
        run(&mut env, "mark $FOO ${FOO:-x} ${UNSET:-fallback}");
        assert_eq!(marks(&env), "bar;bar;fallback;");
    }

    #[test]
    fn empty_parameter_error_fails_the_command() {
        let mut env = test_env();
        let result = run(&mut env, "mark ${UNSET:?missing}");
        assert_eq!(result, Continue(ExitStatus::FAILURE));
        assert_eq!(marks(&env), "");
    }

    #[test]
    fn if_runs_the_then_branch_on_success() {
        let mut env = test_env();
        run(&mut env, "if true; then mark t; else mark e; fi");
        assert_eq!(marks(&env), "t;");
    }

    #[test]
    fn if_runs_the_else_branch_on_failure() {
        let mut env = test_env();
        run(&mut env, "if false; then mark t; else mark e; fi");
        assert_eq!(marks(&env), "e;");
    }

    #[test]
    fn if_without_else_succeeds_on_false_condition() {
        let mut env = test_env();
        assert_eq!(
            run(&mut env, "if false; then mark t; fi"),
            Continue(ExitStatus::SUCCESS)
        );
        assert_eq!(marks(&env), "");
    }

    #[test]
    fn elif_chains_dispatch_correctly() {
        let mut env = test_env();
        run(&mut env, "if false; then mark a; elif true; then mark b; else mark c; fi");
        assert_eq!(marks(&env), "b;");
    }

    #[test]
    fn while_loops_until_the_condition_fails() {
        let mut env = test_env();
        run(&mut env, "N=3");
        run(&mut env, "while countdown; do mark x; done");
        assert_eq!(marks(&env), "x;x;x;");
    }

    #[test]
    fn while_with_initially_false_condition_runs_zero_times() {
        let mut env = test_env();
        assert_eq!(
            run(&mut env, "while false; do mark x; done"),
            Continue(ExitStatus::SUCCESS)
        );
        assert_eq!(marks(&env), "");
    }

    #[test]
    fn for_iterates_over_its_words() {
        let mut env = test_env();
        run(&mut env, "for x in a b c; do mark $x; done");
        assert_eq!(marks(&env), "a;b;c;");
        assert_eq!(env.variables.get("x"), Some("c"));
    }

    #[test]
    fn for_words_are_expanded() {
        let mut env = test_env();
        run(&mut env, "LIST_FIRST=one");
        run(&mut env, "for v in $LIST_FIRST two; do mark $v; done");
        assert_eq!(marks(&env), "one;two;");
    }

    #[test]
    fn for_with_no_words_runs_zero_times() {
        let mut env = test_env();
        run(&mut env, "for x; do mark $x; done");
        assert_eq!(marks(&env), "");
    }

    #[test]
    fn block_runs_in_the_current_shell() {
        let mut env = test_env();
        run(&mut env, "{ FOO=inner; mark $FOO }");
        assert_eq!(env.variables.get("FOO"), Some("inner"));
    }

    #[test]
    fn function_definition_and_call() {
        let mut env = test_env();
        assert_eq!(
            run(&mut env, "greet() { mark hello; }"),
            Continue(ExitStatus::SUCCESS)
        );
        assert!(env.functions.get("greet").is_some());
        assert_eq!(marks(&env), "");

        run(&mut env, "greet");
        assert_eq!(marks(&env), "hello;");
    }

    #[test]
    fn function_arguments_become_positional_parameters() {
        let mut env = test_env();
        run(&mut env, "show() { mark $1 $2 $#; }");
        run(&mut env, "show first second");
        assert_eq!(marks(&env), "first;second;2;");
        // The caller's parameters are restored.
        assert!(env.positional_params.is_empty());
    }

    #[test]
    fn return_unwinds_a_function() {
        let mut env = test_env();
        run(&mut env, "f() { return 3; mark unreachable; }");
        assert_eq!(run(&mut env, "f"), Continue(ExitStatus(3)));
        assert_eq!(marks(&env), "");
    }

    #[test]
    fn return_without_status_keeps_the_last_status() {
        let mut env = test_env();
        run(&mut env, "f() { false; return; }");
        assert_eq!(run(&mut env, "f"), Continue(ExitStatus::FAILURE));
    }

    #[test]
    fn functions_shadow_builtins() {
        let mut env = test_env();
        run(&mut env, "true() { mark shadowed; }");
        run(&mut env, "true");
        assert_eq!(marks(&env), "shadowed;");
    }

    #[test]
    fn exit_diverts_out_of_the_whole_tree() {
        let mut env = test_env();
        let result = run(&mut env, "mark a; exit 5; mark b");
        assert_eq!(result, Break(Divert::Exit(Some(ExitStatus(5)))));
        assert_eq!(marks(&env), "a;");
    }

    #[test]
    fn exit_diverts_out_of_a_function_too() {
        let mut env = test_env();
        run(&mut env, "f() { exit 7; }");
        assert_eq!(run(&mut env, "f"), Break(Divert::Exit(Some(ExitStatus(7)))));
    }

    #[test]
    fn empty_input_executes_to_success() {
        let mut env = test_env();
        assert_eq!(run(&mut env, ""), Continue(ExitStatus::SUCCESS));
        assert_eq!(run(&mut env, "# comment"), Continue(ExitStatus::SUCCESS));
    }

    #[test]
    fn deep_function_recursion_is_cut_off() {
        let mut env = test_env();
        run(&mut env, "f() { f; }");
        // Terminates with a failure instead of overflowing the stack.
        assert_eq!(run(&mut env, "f"), Continue(ExitStatus::FAILURE));
    }
}
