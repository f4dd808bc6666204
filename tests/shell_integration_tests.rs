use ringlist::{
    shell::Container, ContainerError, ErrorExt, Reply, SequenceKind, Session, ShellError,
    StatusCode,
};

fn run_script(
    kind: SequenceKind,
    capacity: usize,
    script: &str,
) -> (Session, Vec<Result<Reply, ShellError>>) {
    let mut session = Session::new(kind, capacity).unwrap();
    let replies = script
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| session.handle_line(line))
        .collect();

    (session, replies)
}

#[test]
fn test_same_script_same_output() {
    let script = "
        push_back 10
        push_back 20
        push_front 5
        push_back 30
        show
        remove_evens
        show
        pop_back
        empty
        size
    ";

    let (_, buffer) = run_script(SequenceKind::Buffer, 2, script);
    let (_, list) = run_script(SequenceKind::List, 2, script);

    assert_eq!(buffer, list);
    assert_eq!(buffer[4], Ok(Reply::Contents("[5, 10, 20, 30]".into())));
    assert_eq!(buffer[6], Ok(Reply::Contents("[10, 30]".into())));
    assert_eq!(buffer[7], Ok(Reply::Value(30)));
    assert_eq!(buffer[8], Ok(Reply::Bool(false)));
    assert_eq!(buffer[9], Ok(Reply::Size(1)));
}

#[test]
fn test_error_replies_carry_status_codes() {
    let (session, replies) = run_script(
        SequenceKind::Buffer,
        4,
        "
        pop_front
        at 0
        push_back x
        frobnicate
        insert_after
        ",
    );

    let codes: Vec<StatusCode> = replies
        .iter()
        .map(|r| r.as_ref().unwrap_err().status_code())
        .collect();

    assert_eq!(
        codes,
        vec![
            StatusCode::EmptyContainer,
            StatusCode::IndexOutOfBounds,
            StatusCode::InvalidInteger,
            StatusCode::InvalidCommand,
            StatusCode::InvalidArgs,
        ]
    );
    assert_eq!(session.executed(), 0);
}

#[test]
fn test_container_state_after_script() {
    let (session, _) = run_script(
        SequenceKind::Buffer,
        3,
        "
        push_back 1
        push_back 2
        push_back 3
        push_back 4
        ",
    );

    match session.container() {
        Container::Buffer(buf) => {
            assert_eq!(buf.capacity(), 6);
            assert_eq!(buf.to_string(), "[1, 2, 3, 4]");
        }
        other => panic!("unexpected container: {other:?}"),
    }
}

#[test]
fn test_zero_capacity_session() {
    assert_eq!(
        Session::new(SequenceKind::Buffer, 0).unwrap_err(),
        ContainerError::InvalidCapacity { requested: 0 }
    );
}
