use dupline_core::{
    CommandRegistry, Direction, EditorHost, Position, Selection, Settings, TextBuffer, execute,
};

fn main() {
    let settings = Settings::default();
    let registry = CommandRegistry::from_settings(&settings);
    let mut buffer = TextBuffer::new("let x = 1;\nlet y = 2;");

    // Two carets, one per line: both lines are copied below themselves.
    buffer
        .set_selections(vec![
            Selection::caret(Position::new(0, 4)),
            Selection::caret(Position::new(1, 4)),
        ])
        .unwrap();
    registry
        .invoke("duplicate-line-down", &mut buffer, &settings)
        .unwrap();
    assert_eq!(
        buffer.text(),
        "let x = 1;\nlet x = 1;\nlet y = 2;\nlet y = 2;"
    );

    // Copy the word before the caret to its right.
    buffer
        .set_selections(vec![Selection::caret(Position::new(0, 10))])
        .unwrap();
    execute(&mut buffer, Direction::Right, &settings).unwrap();
    assert_eq!(buffer.lines()[0], "let x = 1; 1;");

    // Copy a selection upwards, keeping it selected.
    buffer
        .set_selections(vec![Selection::new(
            Position::new(3, 0),
            Position::new(3, 3),
        )])
        .unwrap();
    execute(&mut buffer, Direction::SelectionUp, &settings).unwrap();
    assert_eq!(buffer.lines()[3], "let y = 2;");
    assert_eq!(
        buffer.selections(),
        vec![Selection::new(Position::new(3, 3), Position::new(3, 0))]
    );

    for (i, line) in buffer.lines().iter().enumerate() {
        println!("{i}: {line}");
    }
}
