//! Diffs shared by the unit tests.

pub const FIXTURE_PIPED: &str = "\
--- \"src/GitHubClient.js\"      2020-07-26 20:24:35.497737700 +0200
+++ -   2020-07-26 20:25:43.893994400 +0200
@@ -92,7 +92,7 @@
       return comments;
     }
     return chunks.reduce((comments, chunk) => {
-      comments.push(makeComment(to === '-' ? from : to, chunk));
+      comments.push(makeComment(to === \"-\" ? from : to, chunk));
       return comments;
     }, comments);
   }, []);
";

pub const FIXTURE_PIPED_WINDOWS: &str = "\
--- \"src\\GitHubClient.js\"      2020-07-26 20:24:35.497737700 +0200
+++ -   2020-07-26 20:25:43.893994400 +0200
@@ -92,7 +92,7 @@
       return comments;
     }
     return chunks.reduce((comments, chunk) => {
-      comments.push(makeComment(to === '-' ? from : to, chunk));
+      comments.push(makeComment(to === \"-\" ? from : to, chunk));
       return comments;
     }, comments);
   }, []);
";

pub const FIXTURE_UNIDIFF: &str = "\
diff --git a/src/Graphics/TextureAllocator.gl.h b/src/Graphics/TextureAllocator.gl.h
index 366b30f7..f17e3c88 100644
--- a/src/Graphics/TextureAllocator.gl.h
+++ b/src/Graphics/TextureAllocator.gl.h
@@ -18,8 +18,8 @@ namespace rainbow::graphics::gl

         void destroy(TextureHandle&) override;

-        [[maybe_unused, nodiscard]]
-        auto max_size() const noexcept -> size_t override;
+        [[maybe_unused, nodiscard]] auto max_size() const noexcept
+            -> size_t override;

         void update(const TextureHandle&,
                     const Image&,
diff --git a/src/Graphics/VertexArray.h b/src/Graphics/VertexArray.h
index 31e66c01..8bc6fc35 100644
--- a/src/Graphics/VertexArray.h
+++ b/src/Graphics/VertexArray.h
@@ -50,10 +50,7 @@ namespace rainbow::graphics
         /// <summary>
         ///   Returns whether this vertex array object is valid.
         /// </summary>
-        explicit operator bool() const
-        {
-            return static_cast<bool>(array_);
-        }
+        explicit operator bool() const { return static_cast<bool>(array_); }

     private:
 #ifdef USE_VERTEX_ARRAY_OBJECT
";
