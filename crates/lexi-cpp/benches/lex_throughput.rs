use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lexi_cpp::CppLexer;
use lexi_doc::MemoryDocument;
use lexi_engine::Lexer;

const SAMPLE: &str = r#"
#include <vector>
#include <string>

namespace demo {

// Returns the sum of a vector of integers.
int sum(const std::vector<int>& values) {
    int total = 0;
    for (int v : values) {
        total += v;
    }
    return total;
}

/** Doc comment describing Widget.
 *  @param name the widget's name
 */
class Widget {
public:
    explicit Widget(std::string name) : name_(std::move(name)) {}
    const std::string& name() const { return name_; }

private:
    std::string name_;
};

#ifdef DEBUG_WIDGET
#define LOG(x) std::cerr << x << std::endl
#else
#define LOG(x)
#endif

}  // namespace demo
"#;

fn bench_lex(c: &mut Criterion) {
    c.bench_function("lex_cpp_sample", |b| {
        b.iter(|| {
            let mut lexer = CppLexer::new();
            lexer.word_list_set(0, "int const for return class explicit namespace");
            let mut doc = MemoryDocument::from_str(black_box(SAMPLE));
            lexer.lex(&mut doc, 0, doc.len(), 0);
            lexer.fold(&mut doc, 0, doc.len(), 0);
            black_box(doc);
        });
    });
}

criterion_group!(benches, bench_lex);
criterion_main!(benches);
