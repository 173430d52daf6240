use dupline_core::{
    Direction, EditOperation, EditorHost, Position, Selection, Settings, TextBuffer, Transaction,
    duplicate,
};
use pretty_assertions::assert_eq;

fn caret(line: usize, column: usize) -> Selection {
    Selection::caret(Position::new(line, column))
}

fn select(anchor: (usize, usize), head: (usize, usize)) -> Selection {
    Selection::new(
        Position::new(anchor.0, anchor.1),
        Position::new(head.0, head.1),
    )
}

fn no_space() -> Settings {
    Settings {
        add_space_between: false,
        ..Settings::default()
    }
}

fn run_with(
    text: &str,
    selections: Vec<Selection>,
    direction: Direction,
    settings: &Settings,
) -> (TextBuffer, Transaction) {
    let mut buffer = TextBuffer::new(text);
    buffer.set_selections(selections).unwrap();
    let tx = duplicate(&buffer.selections(), direction, &buffer, settings).unwrap();
    if !tx.is_empty() {
        buffer.apply_transaction(&tx).unwrap();
    }
    (buffer, tx)
}

fn run(text: &str, selections: Vec<Selection>, direction: Direction) -> (TextBuffer, Transaction) {
    run_with(text, selections, direction, &Settings::default())
}

#[test]
fn test_right_caret_word_with_space() {
    let (buffer, tx) = run("foo", vec![caret(0, 3)], Direction::Right);

    assert_eq!(
        tx.changes,
        vec![EditOperation::insert(Position::new(0, 3), " foo")]
    );
    assert_eq!(buffer.text(), "foo foo");
    assert_eq!(buffer.selections(), vec![caret(0, 7)]);
}

#[test]
fn test_left_caret_word_with_space() {
    let (buffer, tx) = run("foo", vec![caret(0, 3)], Direction::Left);

    assert_eq!(
        tx.changes,
        vec![EditOperation::insert(Position::new(0, 0), "foo ")]
    );
    assert_eq!(buffer.text(), "foo foo");
    assert_eq!(buffer.selections(), vec![caret(0, 3)]);
}

#[test]
fn test_right_without_space() {
    let (buffer, _) = run_with("foo", vec![caret(0, 3)], Direction::Right, &no_space());

    assert_eq!(buffer.text(), "foofoo");
    assert_eq!(buffer.selections(), vec![caret(0, 6)]);
}

#[test]
fn test_left_without_space() {
    let (buffer, _) = run_with("foo", vec![caret(0, 3)], Direction::Left, &no_space());

    assert_eq!(buffer.text(), "foofoo");
    assert_eq!(buffer.selections(), vec![caret(0, 3)]);
}

#[test]
fn test_caret_at_line_start_is_noop() {
    let (buffer, tx) = run("foo", vec![caret(0, 0)], Direction::Right);

    assert!(tx.is_empty());
    assert_eq!(buffer.text(), "foo");
}

#[test]
fn test_caret_after_whitespace_is_noop() {
    let (buffer, tx) = run("foo ", vec![caret(0, 4)], Direction::Left);

    assert!(tx.is_empty());
    assert_eq!(buffer.text(), "foo ");
    assert_eq!(buffer.selections(), vec![caret(0, 4)]);
}

#[test]
fn test_caret_inside_line_takes_word_before_it() {
    let (buffer, _) = run("let value = 1", vec![caret(0, 9)], Direction::Right);

    assert_eq!(buffer.text(), "let value value = 1");
    assert_eq!(buffer.selections(), vec![caret(0, 15)]);
}

#[test]
fn test_right_forward_selection_moves_onto_copy() {
    let (buffer, _) = run("hello world", vec![select((0, 0), (0, 5))], Direction::Right);

    assert_eq!(buffer.text(), "hello hello world");
    assert_eq!(buffer.selections(), vec![select((0, 6), (0, 11))]);
}

#[test]
fn test_right_backward_selection_keeps_orientation() {
    let (buffer, _) = run("hello world", vec![select((0, 5), (0, 0))], Direction::Right);

    assert_eq!(buffer.text(), "hello hello world");
    assert_eq!(buffer.selections(), vec![select((0, 11), (0, 6))]);
}

#[test]
fn test_left_selection_stays_on_copy() {
    let (buffer, _) = run("hello world", vec![select((0, 6), (0, 11))], Direction::Left);

    assert_eq!(buffer.text(), "hello world world");
    assert_eq!(buffer.selections(), vec![select((0, 6), (0, 11))]);
}

#[test]
fn test_right_two_carets_on_one_line() {
    let (buffer, tx) = run("foo bar", vec![caret(0, 3), caret(0, 7)], Direction::Right);

    assert_eq!(
        tx.changes,
        vec![
            EditOperation::insert(Position::new(0, 3), " foo"),
            EditOperation::insert(Position::new(0, 7), " bar"),
        ]
    );
    assert_eq!(
        tx.sequential_changes(),
        &[
            EditOperation::insert(Position::new(0, 3), " foo"),
            EditOperation::insert(Position::new(0, 11), " bar"),
        ]
    );
    assert_eq!(buffer.text(), "foo foo bar bar");
    assert_eq!(buffer.selections(), vec![caret(0, 7), caret(0, 15)]);
}

#[test]
fn test_left_two_carets_on_one_line() {
    let (buffer, tx) = run("foo bar", vec![caret(0, 3), caret(0, 7)], Direction::Left);

    assert_eq!(
        tx.sequential_changes(),
        &[
            EditOperation::insert(Position::new(0, 0), "foo "),
            EditOperation::insert(Position::new(0, 8), "bar "),
        ]
    );
    assert_eq!(buffer.text(), "foo foo bar bar");
    assert_eq!(buffer.selections(), vec![caret(0, 3), caret(0, 11)]);
}

#[test]
fn test_caret_inside_earlier_selection_is_skipped() {
    let (buffer, tx) = run(
        "alpha beta",
        vec![select((0, 0), (0, 10)), caret(0, 5)],
        Direction::Right,
    );

    assert_eq!(tx.changes.len(), 1);
    assert_eq!(buffer.text(), "alpha beta alpha beta");
    assert_eq!(buffer.selections(), vec![select((0, 11), (0, 21))]);
}

#[test]
fn test_right_multi_line_selection() {
    let (buffer, tx) = run("ab\ncd", vec![select((0, 1), (1, 1))], Direction::Right);

    assert_eq!(
        tx.changes,
        vec![EditOperation::insert(Position::new(1, 1), " b\nc")]
    );
    assert_eq!(buffer.lines(), vec!["ab", "c b", "cd"]);
    assert_eq!(buffer.selections(), vec![select((1, 2), (2, 1))]);
}

#[test]
fn test_right_after_multi_line_copy_on_later_line() {
    let (buffer, tx) = run(
        "ab\ncd\nxy",
        vec![select((0, 1), (1, 1)), caret(2, 2)],
        Direction::Right,
    );

    assert_eq!(
        tx.sequential_changes()[1],
        EditOperation::insert(Position::new(3, 2), " xy")
    );
    assert_eq!(buffer.lines(), vec!["ab", "c b", "cd", "xy xy"]);
    assert_eq!(buffer.selections()[1], caret(3, 5));
}

#[test]
fn test_astral_characters_use_utf16_columns() {
    let (buffer, tx) = run("x 😀😀", vec![caret(0, 6)], Direction::Right);

    assert_eq!(tx.changes[0].text, " 😀😀");
    assert_eq!(buffer.text(), "x 😀😀 😀😀");
    assert_eq!(buffer.selections(), vec![caret(0, 11)]);
}

#[test]
fn test_whitespace_only_selection_is_skipped() {
    let (buffer, tx) = run("a   b", vec![select((0, 1), (0, 4))], Direction::Right);

    assert!(tx.is_empty());
    assert_eq!(buffer.text(), "a   b");
}
