use knit_core::{HOST_KEY, Layout, NetrcFile, parse};
use knit_test_utils::NetrcGuard;

const GOOD_NETRC: &str = "# I am a comment
machine mail.google.com
\tlogin joe@gmail.com
  account justagmail #end of line comment with trailing space
  password somethingSecret
 # I am another comment

macdef allput
put src/*

macdef allput2
  put src/*
put src2/*

machine ray login demo password mypassword

machine weirdlogin login uname password pass#pass

default
  login anonymous
  password joe@example.com
";

#[test]
fn test_reads_inline_and_multiline_machines() {
  let netrc = parse(
    "machine mail.google.com # foo
  login joe@gmail.com
  account gmail
  password somethingSecret
machine ray login demo password mypassword",
  );

  let google = netrc.get("mail.google.com").unwrap();
  assert_eq!(google.login(), Some("joe@gmail.com"));
  assert_eq!(google.account(), Some("gmail"));
  assert_eq!(google.password(), Some("somethingSecret"));
  assert_eq!(google.comment(), Some("# foo"));
  assert_eq!(google.layout(), Layout::Multiline);

  let ray = netrc.get("ray").unwrap();
  assert_eq!(ray.login(), Some("demo"));
  assert_eq!(ray.password(), Some("mypassword"));
  assert_eq!(ray.layout(), Layout::Inline);
}

#[test]
fn test_default_block_between_machines_is_not_a_machine() {
  let netrc = parse(
    "# I am a comment
machine mail.google.com
  login joe@gmail.com
  account gmail
  password somethingSecret
# I am another comment

default
  login anonymous
  password joe@example.com

machine ray login demo password mypassword
  ",
  );

  assert_eq!(netrc.hosts().collect::<Vec<_>>(), vec!["mail.google.com", "ray"]);
  assert_eq!(netrc.get("mail.google.com").unwrap().password(), Some("somethingSecret"));
  assert_eq!(netrc.get("ray").unwrap().login(), Some("demo"));
}

#[test]
fn test_good_file_values() {
  let netrc = parse(GOOD_NETRC);

  let google = netrc.get("mail.google.com").unwrap();
  assert_eq!(google.login(), Some("joe@gmail.com"));
  assert_eq!(google.account(), Some("justagmail"));
  assert_eq!(google.password(), Some("somethingSecret"));
  assert_eq!(netrc.get("weirdlogin").unwrap().password(), Some("pass"));
}

#[test]
fn test_saving_edits_only_touched_entries() {
  let input = "# I am a comment
machine mail.google.com
\tlogin joe@gmail.com
  password somethingSecret #end of line comment with trailing space
 # I am another comment

macdef allput
put src/*

macdef allput2
  put src/*
put src2/*

machine ray login demo password mypassword

machine weirdlogin login uname password pass#pass

default
  login anonymous
  password joe@example.com
";
  let guard = NetrcGuard::new(input);
  let mut file = NetrcFile::open(guard.netrc_path()).unwrap();
  let netrc = file.machines_mut();

  {
    let mut google = netrc.get_mut("mail.google.com").unwrap();
    google.set("login", "joe2@gmail.com").unwrap();
    google.set("account", "justanaccount").unwrap();
  }
  {
    let mut ray = netrc.get_mut("ray").unwrap();
    ray.set("login", "demo2").unwrap();
    ray.set("account", "newaccount").unwrap();
  }
  netrc.set("new", [("login", "myuser"), ("password", "mypass")]).unwrap();
  netrc.set("anothernew", Vec::<(&str, &str)>::new()).unwrap();
  netrc.set("anothernew", [("login", "myuser")]).unwrap();
  file.save().unwrap();

  assert_eq!(
    guard.contents(),
    "# I am a comment
machine mail.google.com
  login joe2@gmail.com
  password somethingSecret #end of line comment with trailing space
  account justanaccount
 # I am another comment

macdef allput
put src/*

macdef allput2
  put src/*
put src2/*

machine ray login demo2 password mypassword account newaccount
machine weirdlogin login uname password pass #pass

default
  login anonymous
  password joe@example.com
machine new login myuser password mypass
machine anothernew login myuser
"
  );
}

#[test]
fn test_adding_machine_after_multiline_entry() {
  let guard = NetrcGuard::new(
    "machine api.dickeyxxx.com # foo
  login jeff@foo.com
  password myapikey",
  );
  let mut file = NetrcFile::open(guard.netrc_path()).unwrap();
  file
    .machines_mut()
    .set("foo.bar.com", [("login", "foo@bar.com"), ("password", "foopassword")])
    .unwrap();
  file.save().unwrap();

  assert_eq!(
    guard.contents(),
    "machine api.dickeyxxx.com # foo
  login jeff@foo.com
  password myapikey
machine foo.bar.com
  login foo@bar.com
  password foopassword\n"
  );
}

#[test]
fn test_edit_host() {
  let mut netrc = parse("machine a\n  login jeff@foo.com\n  password myapikey\n");
  netrc.get_mut("a").unwrap().set(HOST_KEY, "b").unwrap();

  assert_eq!(netrc.to_string(), "machine b\n  login jeff@foo.com\n  password myapikey\n");
}

#[test]
fn test_edit_existing_machine_keeps_each_indentation() {
  let mut netrc = parse(
    "machine api.dickeyxxx.com # foo
  login jeff@foo.com
  password myapikey
machine b
\tlogin jeff@bar.com
\tpassword myapikey2",
  );
  netrc
    .set("api.dickeyxxx.com", [("login", "foo@bar.com"), ("password", "foopassword")])
    .unwrap();
  netrc.get_mut("b").unwrap().set("login", "foobar").unwrap();

  assert_eq!(
    netrc.to_string(),
    "machine api.dickeyxxx.com # foo
  login foo@bar.com
  password foopassword
machine b
\tlogin foobar
\tpassword myapikey2\n"
  );
}

#[test]
fn test_removing_machine_reorders_remaining_credentials() {
  let mut netrc = parse(
    "machine api.dickeyxxx.com # foo
  login jeff@foo.com
  password myapikey
machine foo.bar.com
  password foopassword
  login foo@bar.com
",
  );
  assert!(netrc.remove("api.dickeyxxx.com"));

  assert_eq!(
    netrc.to_string(),
    "machine foo.bar.com\n  login foo@bar.com\n  password foopassword\n"
  );
}

#[test]
fn test_empty_file_gets_inline_entries() {
  let mut netrc = parse("");
  netrc.set("api.dickeyxxx.com", [("login", "foo"), ("password", "bar")]).unwrap();
  netrc.set("foo.dickeyxxx.com", [("login", "foo2"), ("password", "bar2")]).unwrap();

  assert_eq!(
    netrc.to_string(),
    "machine api.dickeyxxx.com login foo password bar\nmachine foo.dickeyxxx.com login foo2 password bar2\n"
  );
}

#[test]
fn test_file_with_nothing_useful_keeps_its_content() {
  let mut netrc = parse("foobar\n");
  netrc.set("api.dickeyxxx.com", [("login", "foo"), ("password", "bar")]).unwrap();
  netrc.set("foo.dickeyxxx.com", [("login", "foo2"), ("password", "bar2")]).unwrap();

  assert_eq!(
    netrc.to_string(),
    "foobar\nmachine api.dickeyxxx.com login foo password bar\nmachine foo.dickeyxxx.com login foo2 password bar2\n"
  );
}

#[test]
fn test_new_machine_after_text_without_final_newline() {
  let mut netrc = parse("machine a login u\n# end");
  netrc.set("b", [("login", "x")]).unwrap();

  let first = netrc.to_string();
  assert_eq!(first, "machine a login u\n# end\nmachine b login x\n");
  assert_eq!(parse(&first).to_string(), first);
  assert_eq!(parse(&first).hosts().collect::<Vec<_>>(), vec!["a", "b"]);
}

#[test]
fn test_duplicate_entries_collapse_to_first() {
  let netrc = parse(
    "machine a
  login foo
  password bar
machine b
  login foo2
  password bar2
machine a
  login ignoreme
  password ignoreme
",
  );

  assert_eq!(netrc.get("a").unwrap().login(), Some("foo"));
  assert_eq!(
    netrc.to_string(),
    "machine a\n  login foo\n  password bar\nmachine b\n  login foo2\n  password bar2\n"
  );
}

#[test]
fn test_only_login_or_only_password() {
  let mut netrc = parse("machine u login foo password pass");
  netrc.set("foo", [("login", "uu")]).unwrap();
  netrc.set("bar", [("password", "pp")]).unwrap();

  assert_eq!(
    netrc.to_string(),
    "machine u login foo password pass\nmachine foo login uu\nmachine bar password pp\n"
  );
}

#[test]
fn test_serialized_output_is_a_fixed_point() {
  let first = parse(GOOD_NETRC).to_string();
  let second = parse(&first).to_string();

  assert_eq!(first, second);
}
