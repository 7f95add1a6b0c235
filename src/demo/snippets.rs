//! Code snippets shown in the live demo.

/// One tab of the live demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snippet {
    pub title: &'static str,
    pub code: &'static str,
}

/// The demo's snippets, in tab order.
pub const SNIPPETS: [Snippet; 3] = [
    Snippet {
        title: "React Component",
        code: r#"function Button({ children, onClick }) {
  return (
    <button
      onClick={onClick}
      className="px-4 py-2 bg-blue-500
        text-white rounded hover:bg-blue-600"
    >
      {children}
    </button>
  );
}"#,
    },
    Snippet {
        title: "API Endpoint",
        code: r#"app.get('/api/users', async (req, res) => {
  try {
    const users = await User.find()
      .select('-password')
      .limit(10);
    res.json(users);
  } catch (error) {
    res.status(500).json({
      error: 'Failed to fetch users'
    });
  }
});"#,
    },
    Snippet {
        title: "Data Structure",
        code: r#"class Node {
  constructor(value) {
    this.value = value;
    this.next = null;
  }
}

class LinkedList {
  constructor() {
    this.head = null;
    this.size = 0;
  }

  add(value) {
    const node = new Node(value);
    if (!this.head) {
      this.head = node;
    } else {
      let current = this.head;
      while (current.next) {
        current = current.next;
      }
      current.next = node;
    }
    this.size++;
  }
}"#,
    },
];
